//! Output module for writing discovery reports
//!
//! This module handles:
//! - Serializing results as JSON or CSV
//! - Naming the report file after its format
//! - Summary statistics for a finished run

mod csv_output;
mod json;
pub mod stats;
mod traits;

pub use csv_output::{CsvReport, LIST_DELIMITER};
pub use json::JsonReport;
pub use stats::{print_summary, summarize, ReportSummary};
pub use traits::{OutputError, OutputFormat, OutputResult, ReportWriter};

use crate::state::SitemapResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Returns the writer for a format
pub fn writer_for(format: OutputFormat) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonReport),
        OutputFormat::Csv => Box::new(CsvReport),
    }
}

/// Appends the format extension to a base name unless already present
///
/// # Examples
///
/// ```
/// use sitemap_finder::output::{output_path, OutputFormat};
/// use std::path::PathBuf;
///
/// assert_eq!(output_path("report", OutputFormat::Csv), PathBuf::from("report.csv"));
/// assert_eq!(output_path("report.json", OutputFormat::Json), PathBuf::from("report.json"));
/// ```
pub fn output_path(base: impl AsRef<Path>, format: OutputFormat) -> PathBuf {
    let base = base.as_ref();
    let has_extension = base
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));

    if has_extension {
        base.to_path_buf()
    } else {
        let mut name = base.as_os_str().to_owned();
        name.push(".");
        name.push(format.extension());
        PathBuf::from(name)
    }
}

/// Writes the report file and returns its final path
///
/// # Arguments
///
/// * `results` - One row per input domain, in input order
/// * `base` - Report base name; the format extension is appended when missing
/// * `format` - Report format
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_report_file(
    results: &[SitemapResult],
    base: impl AsRef<Path>,
    format: OutputFormat,
) -> OutputResult<PathBuf> {
    let path = output_path(base, format);

    let mut out = BufWriter::new(File::create(&path)?);
    writer_for(format).write_report(results, &mut out)?;
    out.flush()?;

    tracing::info!("Wrote {} result(s) to {}", results.len(), path.display());
    Ok(path)
}
