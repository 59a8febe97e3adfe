//! CSV report with one row per domain
//!
//! Multi-valued columns are joined with [`LIST_DELIMITER`] into a single cell.

use crate::output::traits::{OutputResult, ReportWriter};
use crate::state::SitemapResult;
use std::io::Write;

/// Separator for multi-valued cells
pub const LIST_DELIMITER: &str = "|";

const HEADER: [&str; 5] = ["domain", "sitemaps", "nested_urls", "status", "error"];

/// CSV writer using standard quoting
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReport;

impl ReportWriter for CsvReport {
    fn write_report(&self, results: &[SitemapResult], out: &mut dyn Write) -> OutputResult<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(HEADER)?;

        for result in results {
            let sitemaps = result.sitemaps.join(LIST_DELIMITER);
            let nested_urls = result.nested_urls.join(LIST_DELIMITER);
            writer.write_record([
                result.domain.as_str(),
                sitemaps.as_str(),
                nested_urls.as_str(),
                result.status.as_str(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DomainRecord;

    fn render(results: &[SitemapResult]) -> String {
        let mut buffer = Vec::new();
        CsvReport.write_report(results, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_joined_cells() {
        let mut record = DomainRecord::new("https://example.com");
        record.add_sitemap("https://example.com/sitemap.xml");
        record.add_sitemap("https://example.com/sitemap.xml.gz");
        record.add_nested("https://example.com/a");

        let output = render(&[record.finish()]);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("domain,sitemaps,nested_urls,status,error"));
        assert_eq!(
            lines.next(),
            Some(
                "https://example.com,https://example.com/sitemap.xml|https://example.com/sitemap.xml.gz,https://example.com/a,success,"
            )
        );
    }

    #[test]
    fn test_error_message_is_quoted() {
        let output = render(&[SitemapResult::error(
            "https://down.example",
            "connection-error: https://down.example/robots.txt: refused, reset",
        )]);

        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[3], "error");
        assert_eq!(
            &row[4],
            "connection-error: https://down.example/robots.txt: refused, reset"
        );
        assert_eq!(&row[1], "");
    }
}
