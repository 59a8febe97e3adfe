//! Robots.txt handling module
//!
//! This module fetches robots.txt for a domain and extracts the sitemap
//! locations it declares. Fetching is best-effort: the caller treats any
//! failure as "no declared sitemaps".

mod parser;

pub use parser::{parse_robots, parse_robots_at};

use crate::crawler::{fetch, FetchError, FetchedResponse, Transport};
use crate::url::join_path;
use std::time::Duration;
use url::Url;

/// Fetched robots.txt and the sitemaps it declares
#[derive(Debug, Clone)]
pub struct RobotsSitemaps {
    /// Final robots.txt URL after redirects
    pub url: String,
    /// Declared sitemap URLs in file order, deduplicated
    pub sitemaps: Vec<String>,
}

/// Fetches `base/robots.txt` and returns its declared sitemaps
///
/// # Arguments
///
/// * `transport` - The shared transport
/// * `base` - Normalized `scheme://host[:port]` base
/// * `timeout` - Per-request timeout
pub async fn fetch_robots(
    transport: &dyn Transport,
    base: &str,
    timeout: Duration,
) -> Result<RobotsSitemaps, FetchError> {
    let robots_url = join_path(base, "/robots.txt");
    let response = fetch(transport, &robots_url, timeout).await?;
    Ok(sitemaps_from_response(&response))
}

/// Extracts declared sitemaps from an already fetched robots.txt response
///
/// Relative declarations are resolved against the robots.txt URL.
pub fn sitemaps_from_response(response: &FetchedResponse) -> RobotsSitemaps {
    let base = Url::parse(&response.final_url).ok();
    RobotsSitemaps {
        url: response.final_url.clone(),
        sitemaps: parse_robots_at(&response.text(), base.as_ref()),
    }
}
