//! State module for per-domain discovery results
//!
//! # Components
//!
//! - `DomainStatus`: Terminal outcome of a domain's discovery run
//! - `UrlSet`: Insertion-ordered, deduplicated set of URLs
//! - `SitemapResult`: The finalized record for one domain
//! - `DomainRecord`: The mutable record owned by a discovery task while it runs

mod domain_status;
mod sitemap_result;
mod url_set;

// Re-export main types
pub use domain_status::DomainStatus;
pub use sitemap_result::{DomainRecord, SitemapResult};
pub use url_set::UrlSet;
