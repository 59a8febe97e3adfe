//! JSON report: an array of result objects

use crate::output::traits::{OutputResult, ReportWriter};
use crate::state::SitemapResult;
use std::io::Write;

/// Pretty-printed JSON array of results
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportWriter for JsonReport {
    fn write_report(&self, results: &[SitemapResult], out: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DomainRecord;

    #[test]
    fn test_json_report_shape() {
        let mut record = DomainRecord::new("https://example.com");
        record.add_sitemap("https://example.com/sitemap.xml");
        record.add_nested("https://example.com/a");

        let results = vec![
            record.finish(),
            SitemapResult::error("bad", "invalid-domain: Empty domain"),
        ];

        let mut buffer = Vec::new();
        JsonReport.write_report(&results, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["domain"], "https://example.com");
        assert_eq!(rows[0]["sitemaps"][0], "https://example.com/sitemap.xml");
        assert_eq!(rows[0]["status"], "success");
        assert!(rows[0]["error"].is_null());
        assert_eq!(rows[1]["status"], "error");
    }

    #[test]
    fn test_empty_report_is_empty_array() {
        let mut buffer = Vec::new();
        JsonReport.write_report(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().trim(), "[]");
    }
}
