//! Report writer trait and shared output types
//!
//! This module defines the trait interface for report writers, the
//! supported output formats, and the errors writing can produce.

use crate::state::SitemapResult;
use serde::Deserialize;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode CSV report: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Report file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// File extension for this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Trait for report writers
///
/// A writer serializes the complete, ordered result list in one go. It is
/// only called after every domain has finished.
pub trait ReportWriter {
    /// Writes every result to `out`
    ///
    /// # Arguments
    ///
    /// * `results` - One row per input domain, in input order
    /// * `out` - Destination of the encoded report
    fn write_report(&self, results: &[SitemapResult], out: &mut dyn Write) -> OutputResult<()>;
}
