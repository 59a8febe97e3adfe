//! Sitemap parser for extracting URLs
//!
//! Parsing is two-staged:
//! - A structured pass over well-formed `<urlset>` / `<sitemapindex>` XML
//! - A tolerant fallback for anything else: malformed XML, plain-text
//!   sitemaps, and HTML sitemap pages
//!
//! The fallback never fails; worst case it yields no URLs.

use crate::state::UrlSet;
use crate::url::{absolute_http_url, resolve_reference};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

static LOC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<loc>\s*(.*?)\s*</loc>").expect("valid loc pattern"));

static BARE_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'`]+"#).expect("valid url pattern"));

/// Which structured sitemap document was parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<sitemapindex>`: the URLs are other sitemaps
    Index,
    /// `<urlset>`: the URLs are content pages
    UrlSet,
}

/// Outcome of parsing a sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapParse {
    /// Well-formed sitemap XML
    Structured { kind: SitemapKind, urls: Vec<String> },
    /// URLs scraped by the tolerant scan
    Fallback(Vec<String>),
}

impl SitemapParse {
    pub fn urls(&self) -> &[String] {
        match self {
            Self::Structured { urls, .. } | Self::Fallback(urls) => urls,
        }
    }

    pub fn into_urls(self) -> Vec<String> {
        match self {
            Self::Structured { urls, .. } | Self::Fallback(urls) => urls,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(
            self,
            Self::Structured {
                kind: SitemapKind::Index,
                ..
            }
        )
    }
}

/// Why the structured pass gave up
#[derive(Debug, Error)]
enum StructuredError {
    #[error("malformed XML: {0}")]
    Xml(String),
    #[error("root element <{0}> is not a sitemap")]
    UnexpectedRoot(String),
    #[error("no root element")]
    NoRoot,
}

/// Parses sitemap text into deduplicated URLs in document order
///
/// # Example
///
/// ```
/// use sitemap_finder::crawler::{parse_sitemap, SitemapKind, SitemapParse};
///
/// let xml = "<urlset><url><loc>https://example.com/a</loc></url></urlset>";
/// assert_eq!(
///     parse_sitemap(xml),
///     SitemapParse::Structured {
///         kind: SitemapKind::UrlSet,
///         urls: vec!["https://example.com/a".to_string()],
///     }
/// );
/// ```
pub fn parse_sitemap(text: &str) -> SitemapParse {
    parse_sitemap_at(text, None)
}

/// Parses sitemap text fetched from `source`
///
/// The source URL lets the fallback resolve relative links on HTML sitemap pages.
pub fn parse_sitemap_at(text: &str, source: Option<&Url>) -> SitemapParse {
    match parse_structured(text) {
        Ok(parsed) => parsed,
        Err(reason) => {
            tracing::trace!("Structured sitemap parse failed ({}), scanning", reason);
            SitemapParse::Fallback(scan_fallback(text, source))
        }
    }
}

/// Parses a well-formed sitemap or sitemap index
fn parse_structured(text: &str) -> Result<SitemapParse, StructuredError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut kind: Option<SitemapKind> = None;
    let mut urls = UrlSet::new();
    let mut depth = 0usize;
    let mut in_entry = false;
    let mut loc_text: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();
                match depth {
                    1 => kind = Some(root_kind(name.as_ref())?),
                    2 => in_entry = name.as_ref() == entry_name(kind),
                    3 if in_entry && name.as_ref() == b"loc" => loc_text = Some(String::new()),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    // Self-closing root: a valid but empty document
                    let kind = root_kind(e.local_name().as_ref())?;
                    return Ok(SitemapParse::Structured {
                        kind,
                        urls: Vec::new(),
                    });
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(buffer) = loc_text.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| StructuredError::Xml(err.to_string()))?;
                    buffer.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(buffer) = loc_text.as_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if depth == 3 {
                    if let Some(loc) = loc_text.take() {
                        if absolute_http_url(&loc).is_some() {
                            urls.insert(loc.trim());
                        }
                    }
                }
                if depth == 2 {
                    in_entry = false;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(StructuredError::Xml(e.to_string())),
            _ => {}
        }
    }

    match kind {
        Some(kind) => Ok(SitemapParse::Structured {
            kind,
            urls: urls.into_vec(),
        }),
        None => Err(StructuredError::NoRoot),
    }
}

fn root_kind(name: &[u8]) -> Result<SitemapKind, StructuredError> {
    match name {
        b"sitemapindex" => Ok(SitemapKind::Index),
        b"urlset" => Ok(SitemapKind::UrlSet),
        other => Err(StructuredError::UnexpectedRoot(
            String::from_utf8_lossy(other).into_owned(),
        )),
    }
}

fn entry_name(kind: Option<SitemapKind>) -> &'static [u8] {
    match kind {
        Some(SitemapKind::Index) => b"sitemap",
        _ => b"url",
    }
}

/// Scans arbitrary text for `<loc>` values, or bare HTTP(S) URLs if it has none
///
/// Bare URLs are only considered when no `<loc>` element matched, so a
/// broken XML sitemap does not leak its namespace URIs. When the text is an HTML page
/// and its URL is known, `<a href>` links are resolved and appended.
fn scan_fallback(text: &str, source: Option<&Url>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for captures in LOC_PATTERN.captures_iter(text) {
        if let Some(loc) = captures.get(1) {
            found.push(unescape_entities(loc.as_str()));
        }
    }

    if found.is_empty() {
        for bare in BARE_URL_PATTERN.find_iter(text) {
            let url = bare
                .as_str()
                .trim_end_matches(['.', ',', ';', ':', ')', ']', '}', '!', '?']);
            found.push(unescape_entities(url));
        }
    }

    let mut urls = UrlSet::new();
    for candidate in found {
        if absolute_http_url(&candidate).is_some() {
            urls.insert(candidate.trim());
        }
    }

    if let Some(base) = source {
        if looks_like_html(text) {
            urls.extend(extract_html_links(text, base));
        }
    }

    urls.into_vec()
}

fn unescape_entities(raw: &str) -> String {
    raw.trim()
        .replace("&amp;", "&")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

fn looks_like_html(text: &str) -> bool {
    let head: String = text.chars().take(2048).collect::<String>().to_ascii_lowercase();
    head.contains("<html") || head.contains("<!doctype html") || head.contains("<a ")
}

/// Extracts `<a href>` links from an HTML sitemap page
fn extract_html_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if href.trim_start().starts_with('#') {
                    continue;
                }
                if let Some(mut absolute) = resolve_reference(href, base) {
                    absolute.set_fragment(None);
                    links.push(absolute.to_string());
                }
            }
        }
    }

    links
}
