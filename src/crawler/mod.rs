//! Crawler module for sitemap discovery
//!
//! This module contains the core discovery logic, including:
//! - HTTP fetching behind a swappable transport
//! - Gzip and zip archive decoding
//! - Two-stage sitemap parsing (structured, then tolerant)
//! - The per-domain discovery strategy
//! - Bounded-concurrency coordination across domains

pub mod archive;
pub mod candidates;
mod coordinator;
mod fetcher;
mod parser;
mod strategy;

#[cfg(test)]
mod test_support;

pub use archive::{decode, detect_archive, ArchiveKind, DecodeError, DecodedContent};
pub use candidates::{candidate_paths, SITEMAP_PATHS};
pub use coordinator::{run_all, Coordinator};
pub use fetcher::{
    build_http_client, fetch, FetchError, FetchedResponse, ReqwestTransport, Transport,
};
pub use parser::{parse_sitemap, parse_sitemap_at, SitemapKind, SitemapParse};
pub use strategy::{discover_domain, DiscoveryContext, DiscoveryError};

use crate::config::Config;
use crate::state::SitemapResult;
use crate::FinderError;
use std::sync::Arc;

/// Runs a complete discovery operation
///
/// This is the main entry point for a run. It will:
/// 1. Build the shared HTTP transport from the configuration
/// 2. Run discovery for every domain with bounded concurrency
/// 3. Return one result per domain, in input order
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `domains` - Input domains, blank lines already removed
///
/// # Returns
///
/// * `Ok(Vec<SitemapResult>)` - One row per input domain
/// * `Err(FinderError)` - The HTTP client could not be built
pub async fn discover_all(
    config: &Config,
    domains: Vec<String>,
) -> Result<Vec<SitemapResult>, FinderError> {
    let context = DiscoveryContext::from_config(config)?;
    Ok(run_all(Arc::new(context), domains, config.finder.concurrency).await)
}
