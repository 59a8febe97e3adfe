//! URL handling module for Sitemap Finder
//!
//! This module provides domain normalization, candidate URL construction,
//! scheme variants for dual-scheme probing, and absolute URL validation.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{alternate_scheme, join_path, resolve_reference};
pub use normalize::normalize_domain;

use ::url::Url;

/// Returns the URL if it is an absolute, syntactically valid HTTP(S) URL
///
/// Every entry recorded in a result passes through this check, so reports
/// never contain relative references or non-web schemes.
///
/// # Examples
///
/// ```
/// use sitemap_finder::url::absolute_http_url;
///
/// assert!(absolute_http_url("https://example.com/a").is_some());
/// assert!(absolute_http_url("/relative").is_none());
/// assert!(absolute_http_url("ftp://example.com/file").is_none());
/// ```
pub fn absolute_http_url(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url),
        _ => None,
    }
}
