//! Robots.txt parser implementation
//!
//! Only `Sitemap:` directives matter here. They are independent of
//! user-agent groups and may appear anywhere in the file.

use crate::state::UrlSet;
use crate::url::{absolute_http_url, resolve_reference};
use url::Url;

/// Extracts absolute sitemap URLs declared in robots.txt content
///
/// Lines are matched case-insensitively on the `Sitemap` key. Malformed
/// lines and values that are not absolute HTTP(S) URLs are skipped.
///
/// # Example
///
/// ```
/// use sitemap_finder::robots::parse_robots;
///
/// let robots = "User-agent: *\nsitemap: https://example.com/sitemap.xml\n";
/// assert_eq!(parse_robots(robots), vec!["https://example.com/sitemap.xml".to_string()]);
/// ```
pub fn parse_robots(content: &str) -> Vec<String> {
    parse_robots_at(content, None)
}

/// Like [`parse_robots`], resolving relative declarations against `base`
pub fn parse_robots_at(content: &str, base: Option<&Url>) -> Vec<String> {
    let mut sitemaps = UrlSet::new();
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

    for line in content.lines() {
        let trimmed = line.trim();

        // Skip comments and empty lines
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };

        if !key.trim().eq_ignore_ascii_case("sitemap") {
            continue;
        }

        // The URL is the first token; anything after it is a trailing comment
        let Some(value) = value.split_whitespace().next() else {
            continue;
        };

        if absolute_http_url(value).is_some() {
            sitemaps.insert(value);
        } else if let Some(resolved) = base.and_then(|b| resolve_reference(value, b)) {
            sitemaps.insert(resolved.to_string());
        }
    }

    sitemaps.into_vec()
}
