use url::Url;

/// Joins a candidate path onto a normalized base
///
/// The base is the `scheme://host[:port]` form produced by
/// [`normalize_domain`](super::normalize_domain) and the path starts with `/`.
///
/// # Examples
///
/// ```
/// use sitemap_finder::url::join_path;
///
/// assert_eq!(join_path("https://example.com", "/sitemap.xml"), "https://example.com/sitemap.xml");
/// ```
pub fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Returns the same base with the other web scheme (http <-> https)
pub fn alternate_scheme(base: &str) -> Option<String> {
    if let Some(rest) = base.strip_prefix("https://") {
        Some(format!("http://{}", rest))
    } else {
        base.strip_prefix("http://")
            .map(|rest| format!("https://{}", rest))
    }
}

/// Resolves a possibly relative reference against the document it appeared in
///
/// Returns None for references that do not resolve to an HTTP(S) URL.
pub fn resolve_reference(reference: &str, base: &Url) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    let resolved = base.join(reference).ok()?;
    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(
            join_path("https://example.com", "/sitemap_index.xml"),
            "https://example.com/sitemap_index.xml"
        );
    }

    #[test]
    fn test_join_path_tolerates_extra_slashes() {
        assert_eq!(
            join_path("https://example.com/", "/sitemap.xml"),
            "https://example.com/sitemap.xml"
        );
    }

    #[test]
    fn test_join_path_with_port() {
        assert_eq!(
            join_path("http://127.0.0.1:8080", "/robots.txt"),
            "http://127.0.0.1:8080/robots.txt"
        );
    }

    #[test]
    fn test_alternate_scheme() {
        assert_eq!(
            alternate_scheme("https://example.com").as_deref(),
            Some("http://example.com")
        );
        assert_eq!(
            alternate_scheme("http://example.com:81").as_deref(),
            Some("https://example.com:81")
        );
        assert_eq!(alternate_scheme("ftp://example.com"), None);
    }

    #[test]
    fn test_resolve_relative_reference() {
        let base = Url::parse("https://example.com/robots.txt").unwrap();
        let resolved = resolve_reference("/sitemap.xml", &base).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/sitemap.xml");
    }

    #[test]
    fn test_resolve_absolute_reference() {
        let base = Url::parse("https://example.com/robots.txt").unwrap();
        let resolved = resolve_reference("http://cdn.example.com/map.xml", &base).unwrap();
        assert_eq!(resolved.as_str(), "http://cdn.example.com/map.xml");
    }

    #[test]
    fn test_resolve_skips_special_schemes() {
        let base = Url::parse("https://example.com/sitemap.html").unwrap();
        assert!(resolve_reference("mailto:team@example.com", &base).is_none());
        assert!(resolve_reference("", &base).is_none());
    }
}
