use crate::UrlError;
use url::Url;

/// Normalizes a domain line into its `scheme://host[:port]` base form
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace and trailing slashes; reject if empty
/// 2. Assume `https://` when no scheme is given
/// 3. Parse; reject non-HTTP(S) schemes and inputs without a host
/// 4. Lowercase the host (done by the parser) and keep an explicit port
/// 5. Drop any path, query, fragment, or credentials
///
/// Normalizing an already normalized value returns it unchanged.
///
/// # Examples
///
/// ```
/// use sitemap_finder::url::normalize_domain;
///
/// assert_eq!(normalize_domain(" Example.COM/ ").unwrap(), "https://example.com");
/// assert_eq!(normalize_domain("http://localhost:8080").unwrap(), "http://localhost:8080");
/// ```
pub fn normalize_domain(input: &str) -> Result<String, UrlError> {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(UrlError::MissingDomain),
    };

    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
