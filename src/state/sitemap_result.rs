use crate::state::{DomainStatus, UrlSet};
use serde::Serialize;

/// Finalized discovery result for one input domain
///
/// Serializes to the report row shape:
/// `{ domain, sitemaps, nested_urls, status, error }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapResult {
    pub domain: String,
    pub sitemaps: Vec<String>,
    pub nested_urls: Vec<String>,
    pub status: DomainStatus,
    pub error: Option<String>,
}

impl SitemapResult {
    /// Builds an error row with no discovered URLs
    pub fn error(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            sitemaps: Vec::new(),
            nested_urls: Vec::new(),
            status: DomainStatus::Error,
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// True if any discovered sitemap is a gzip or zip archive by name
    pub fn has_compressed_sitemap(&self) -> bool {
        self.sitemaps
            .iter()
            .any(|url| url.ends_with(".gz") || url.ends_with(".zip"))
    }
}

/// Mutable record owned by a single domain's discovery task
///
/// Created at the start of discovery and consumed by [`DomainRecord::finish`]
/// or [`DomainRecord::fail`]; nothing else holds a reference to it.
#[derive(Debug, Clone)]
pub struct DomainRecord {
    domain: String,
    sitemaps: UrlSet,
    nested_urls: UrlSet,
}

impl DomainRecord {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            sitemaps: UrlSet::new(),
            nested_urls: UrlSet::new(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn add_sitemap(&mut self, url: impl Into<String>) -> bool {
        self.sitemaps.insert(url)
    }

    pub fn add_nested(&mut self, url: impl Into<String>) -> bool {
        self.nested_urls.insert(url)
    }

    pub fn sitemaps(&self) -> &UrlSet {
        &self.sitemaps
    }

    pub fn nested_urls(&self) -> &UrlSet {
        &self.nested_urls
    }

    /// Finalizes the record as a successful run
    pub fn finish(self) -> SitemapResult {
        SitemapResult {
            domain: self.domain,
            sitemaps: self.sitemaps.into_vec(),
            nested_urls: self.nested_urls.into_vec(),
            status: DomainStatus::Success,
            error: None,
        }
    }

    /// Finalizes the record as an error, discarding partial findings
    pub fn fail(self, message: impl Into<String>) -> SitemapResult {
        SitemapResult::error(self.domain, message)
    }
}
