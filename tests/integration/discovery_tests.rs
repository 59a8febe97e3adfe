//! Integration tests for sitemap discovery
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! reqwest transport through the full discovery cycle end-to-end.

use flate2::write::GzEncoder;
use flate2::Compression;
use sitemap_finder::config::Config;
use sitemap_finder::crawler::{discover_all, run_all, DiscoveryContext};
use sitemap_finder::state::{DomainStatus, SitemapResult};
use std::io::{Cursor, Write};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Creates a test configuration with a short timeout
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.finder.timeout_secs = 2;
    config.finder.user_agent = "TestBot/1.0".to_string();
    config
}

fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

async fn discover_one(server: &MockServer) -> SitemapResult {
    let mut results = discover_all(&create_test_config(), vec![server.uri()])
        .await
        .expect("Failed to build HTTP client");
    assert_eq!(results.len(), 1);
    results.remove(0)
}

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_robots_declared_sitemap_is_discovered() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /private\nSitemap: {}/maps/custom.xml\n",
            base_url
        )),
    )
    .await;

    mount_get(
        &mock_server,
        "/maps/custom.xml",
        ResponseTemplate::new(200)
            .set_body_string(urlset(&[format!("{}/page-1", base_url)]))
            .insert_header("content-type", "application/xml"),
    )
    .await;

    let result = discover_one(&mock_server).await;
    assert_eq!(result.domain, base_url);
    assert_eq!(result.status, DomainStatus::Success);
    assert_eq!(result.sitemaps, vec![format!("{}/maps/custom.xml", base_url)]);
    assert_eq!(result.nested_urls, vec![format!("{}/page-1", base_url)]);
}

#[tokio::test]
async fn test_gzip_sitemap_is_decoded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/sitemap.xml.gz",
        ResponseTemplate::new(200)
            .set_body_bytes(gzip(&urlset(&[format!("{}/a", base_url)])))
            .insert_header("content-type", "application/gzip"),
    )
    .await;

    let result = discover_one(&mock_server).await;
    assert_eq!(result.sitemaps, vec![format!("{}/sitemap.xml.gz", base_url)]);
    assert_eq!(result.nested_urls, vec![format!("{}/a", base_url)]);
}

#[tokio::test]
async fn test_corrupt_gzip_recorded_without_nested_urls() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut corrupt = gzip(&urlset(&[format!("{}/lost", base_url)]));
    corrupt.truncate(16);

    mount_get(
        &mock_server,
        "/sitemap.xml.gz",
        ResponseTemplate::new(200).set_body_bytes(corrupt),
    )
    .await;

    mount_get(
        &mock_server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(urlset(&[format!("{}/kept", base_url)])),
    )
    .await;

    let result = discover_one(&mock_server).await;
    assert_eq!(result.status, DomainStatus::Success);
    assert!(result
        .sitemaps
        .contains(&format!("{}/sitemap.xml.gz", base_url)));
    assert_eq!(result.nested_urls, vec![format!("{}/kept", base_url)]);
}

#[tokio::test]
async fn test_zip_sitemap_is_decoded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("sitemap.xml", SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(urlset(&[format!("{}/zipped", base_url)]).as_bytes())
        .unwrap();
    let archive = writer.finish().unwrap().into_inner();

    mount_get(
        &mock_server,
        "/sitemap.zip",
        ResponseTemplate::new(200)
            .set_body_bytes(archive)
            .insert_header("content-type", "application/zip"),
    )
    .await;

    let result = discover_one(&mock_server).await;
    assert_eq!(result.sitemaps, vec![format!("{}/sitemap.zip", base_url)]);
    assert_eq!(result.nested_urls, vec![format!("{}/zipped", base_url)]);
}

#[tokio::test]
async fn test_sitemap_index_children_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let index = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{0}/posts.xml</loc></sitemap>
  <sitemap><loc>{0}/pages.xml</loc></sitemap>
  <sitemap><loc>{0}/sitemap_index.xml</loc></sitemap>
</sitemapindex>"#,
        base_url
    );

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(urlset(&[format!("{}/post-1", base_url)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(urlset(&[format!("{}/about", base_url)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = discover_one(&mock_server).await;
    assert_eq!(
        result.sitemaps,
        vec![format!("{}/sitemap_index.xml", base_url)]
    );
    assert!(result.nested_urls.contains(&format!("{}/post-1", base_url)));
    assert!(result.nested_urls.contains(&format!("{}/about", base_url)));
}

#[tokio::test]
async fn test_redirected_sitemap_recorded_under_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_get(
        &mock_server,
        "/sitemap.xml",
        ResponseTemplate::new(301)
            .insert_header("location", format!("{}/moved/sitemap.xml", base_url).as_str()),
    )
    .await;

    mount_get(
        &mock_server,
        "/moved/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(urlset(&[format!("{}/a", base_url)])),
    )
    .await;

    let result = discover_one(&mock_server).await;
    assert_eq!(
        result.sitemaps,
        vec![format!("{}/moved/sitemap.xml", base_url)]
    );
}

#[tokio::test]
async fn test_domain_without_sitemaps_is_success() {
    let mock_server = MockServer::start().await;

    let result = discover_one(&mock_server).await;
    assert_eq!(result.status, DomainStatus::Success);
    assert!(result.sitemaps.is_empty());
    assert!(result.nested_urls.is_empty());
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_unreachable_domain_is_error_row() {
    let results = discover_all(&create_test_config(), vec!["http://127.0.0.1:1".to_string()])
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].domain, "http://127.0.0.1:1");
    assert_eq!(results[0].status, DomainStatus::Error);
    assert!(results[0].error.is_some());
    assert!(results[0].sitemaps.is_empty());
}

#[tokio::test]
async fn test_concurrency_does_not_change_output() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    mount_get(
        &first,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(urlset(&[format!("{}/one", first.uri())])),
    )
    .await;

    mount_get(
        &second,
        "/sitemap.txt",
        ResponseTemplate::new(200).set_body_string(format!("{}/two\n", second.uri())),
    )
    .await;

    let domains = vec![first.uri(), "".to_string(), second.uri()];
    let context = Arc::new(DiscoveryContext::from_config(&create_test_config()).unwrap());

    let serial = run_all(Arc::clone(&context), domains.clone(), 1).await;
    let parallel = run_all(context, domains, 5).await;

    assert_eq!(serial.len(), 3);
    assert_eq!(serial, parallel);
    assert_eq!(serial[0].nested_urls, vec![format!("{}/one", first.uri())]);
    assert_eq!(serial[1].status, DomainStatus::Error);
}
