//! Summary statistics for a finished run
//!
//! This module aggregates the result rows into the counts printed at the
//! end of a run.

use crate::state::SitemapResult;

/// Run summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Number of domains processed
    pub domains: usize,

    /// Total sitemap URLs across all domains
    pub total_sitemaps: usize,

    /// Domains with at least one gzip or zip sitemap
    pub compressed_domains: usize,

    /// Total nested URLs extracted
    pub total_nested_urls: usize,

    pub successes: usize,
    pub errors: usize,
}

/// Aggregates result rows into a summary
pub fn summarize(results: &[SitemapResult]) -> ReportSummary {
    let mut summary = ReportSummary {
        domains: results.len(),
        ..ReportSummary::default()
    };

    for result in results {
        summary.total_sitemaps += result.sitemaps.len();
        summary.total_nested_urls += result.nested_urls.len();

        if result.has_compressed_sitemap() {
            summary.compressed_domains += 1;
        }

        if result.is_success() {
            summary.successes += 1;
        } else {
            summary.errors += 1;
        }
    }

    summary
}

/// Prints the summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &ReportSummary) {
    println!("=== Sitemap Discovery Summary ===\n");

    println!("  Domains processed: {}", summary.domains);
    println!("  Sitemaps found: {}", summary.total_sitemaps);
    println!(
        "  Domains with compressed sitemaps: {}",
        summary.compressed_domains
    );
    println!("  Nested URLs extracted: {}", summary.total_nested_urls);
    println!();

    let success_rate = if summary.domains > 0 {
        (summary.successes as f64 / summary.domains as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} succeeded, {} failed)",
        success_rate, summary.successes, summary.errors
    );
}
