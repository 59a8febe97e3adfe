//! Well-known sitemap locations probed for every domain
//!
//! The list is ordered by priority. New aliases are appended; nothing else
//! in the discovery logic depends on its contents.

/// Relative paths probed for every domain, in priority order
pub const SITEMAP_PATHS: &[&str] = &[
    // Standard formats
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/sitemapindex.xml",
    "/sitemap.php",
    "/sitemap.txt",
    "/sitemap.html",
    // Compressed formats
    "/sitemap.xml.gz",
    "/sitemap.gz",
    "/sitemap.xml.zip",
    "/sitemap.zip",
    "/sitemap_index.xml.gz",
    "/sitemap-index.xml.gz",
    "/sitemapindex.xml.gz",
    // Specialized variants
    "/sitemap-news.xml",
    "/news-sitemap.xml",
    "/news-sitemap.xml.gz",
    "/sitemap-image.xml",
    "/image-sitemap.xml",
    "/image-sitemap.xml.gz",
    "/sitemap-video.xml",
    "/video-sitemap.xml",
    "/video-sitemap.xml.gz",
    "/sitemap-product.xml",
    "/product-sitemap.xml",
    "/product-sitemap.xml.gz",
    "/page-sitemap.xml",
    "/post-sitemap.xml",
    "/category-sitemap.xml",
];

/// Builds the probe list: the built-in paths followed by any extra paths
///
/// Extra paths already in the built-in list are not probed twice.
pub fn candidate_paths(extra: &[String]) -> Vec<String> {
    let mut paths: Vec<String> = SITEMAP_PATHS.iter().map(|p| p.to_string()).collect();
    for path in extra {
        if !paths.contains(path) {
            paths.push(path.clone());
        }
    }
    paths
}
