//! Per-domain discovery strategy
//!
//! For one input domain this module:
//! 1. Normalizes the domain into a `scheme://host[:port]` base
//! 2. Reads robots.txt and follows every declared sitemap
//! 3. Probes every candidate path in priority order
//! 4. Decodes and parses each sitemap found, following index entries one level
//!
//! Each domain owns its own [`DomainRecord`]; nothing here is shared between
//! domains except the read-only [`DiscoveryContext`].

use crate::config::Config;
use crate::crawler::archive::decode;
use crate::crawler::candidates::candidate_paths;
use crate::crawler::fetcher::{fetch, FetchError, FetchedResponse, ReqwestTransport, Transport};
use crate::crawler::parser::parse_sitemap_at;
use crate::robots::fetch_robots;
use crate::state::{DomainRecord, SitemapResult};
use crate::url::{alternate_scheme, join_path, normalize_domain};
use crate::UrlError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Terminal failure of a domain's discovery run
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid-domain: {0}")]
    InvalidDomain(#[from] UrlError),

    /// Every request for the domain failed at the connection level
    #[error("{0}")]
    Unreachable(FetchError),

    #[error("internal-error: {0}")]
    Internal(String),
}

/// Read-only inputs shared by every domain task
///
/// The transport is created once per process and passed in explicitly, so
/// tests can substitute an in-memory implementation.
#[derive(Clone)]
pub struct DiscoveryContext {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    candidate_paths: Vec<String>,
    probe_both_schemes: bool,
}

impl DiscoveryContext {
    /// Creates a context probing the built-in candidate paths
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            candidate_paths: candidate_paths(&[]),
            probe_both_schemes: false,
        }
    }

    /// Builds the reqwest-backed context described by a configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::from_config(&config.finder)?;
        Ok(Self::new(Arc::new(transport), config.finder.timeout())
            .with_extra_paths(&config.paths.extra)
            .with_both_schemes(config.finder.probe_both_schemes))
    }

    /// Appends extra candidate paths after the built-in list
    pub fn with_extra_paths(mut self, extra: &[String]) -> Self {
        self.candidate_paths = candidate_paths(extra);
        self
    }

    /// Replaces the candidate list entirely
    pub fn with_candidate_paths(mut self, paths: Vec<String>) -> Self {
        self.candidate_paths = paths;
        self
    }

    pub fn with_both_schemes(mut self, enabled: bool) -> Self {
        self.probe_both_schemes = enabled;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn candidate_paths(&self) -> &[String] {
        &self.candidate_paths
    }
}

/// Runs discovery for a single input line and returns its finalized result
///
/// Never fails: every error is folded into the returned row.
pub async fn discover_domain(ctx: &DiscoveryContext, input: &str) -> SitemapResult {
    let base = match normalize_domain(input) {
        Ok(base) => base,
        Err(e) => {
            let error = DiscoveryError::from(e);
            tracing::warn!("Skipping {:?}: {}", input.trim(), error);
            return SitemapResult::error(input.trim(), error.to_string());
        }
    };

    let mut bases = vec![base.clone()];
    if ctx.probe_both_schemes {
        bases.extend(alternate_scheme(&base));
    }

    let mut discovery = DomainDiscovery::new(ctx, &base);
    for base in &bases {
        discovery.probe_base(base).await;
    }

    discovery.finish()
}

/// Working state of one domain's discovery run
struct DomainDiscovery<'a> {
    ctx: &'a DiscoveryContext,
    record: DomainRecord,
    /// Every URL fetched so far mapped to its final URL, `None` if the fetch failed
    fetched: HashMap<String, Option<String>>,
    attempts: usize,
    connection_failures: usize,
    last_connection_error: Option<FetchError>,
}

impl<'a> DomainDiscovery<'a> {
    fn new(ctx: &'a DiscoveryContext, domain: &str) -> Self {
        Self {
            ctx,
            record: DomainRecord::new(domain),
            fetched: HashMap::new(),
            attempts: 0,
            connection_failures: 0,
            last_connection_error: None,
        }
    }

    /// Robots-declared sitemaps first, then the candidate paths
    async fn probe_base(&mut self, base: &str) {
        let robots = fetch_robots(self.ctx.transport.as_ref(), base, self.ctx.timeout).await;
        match self.track(robots) {
            Ok(robots) => {
                tracing::debug!(
                    "{} declares {} sitemap(s)",
                    robots.url,
                    robots.sitemaps.len()
                );
                for url in robots.sitemaps {
                    self.record.add_sitemap(url.as_str());
                    self.process_sitemap(&url).await;
                }
            }
            Err(e) if e.is_connection_level() => {
                tracing::warn!("robots.txt unavailable for {}: {}", base, e)
            }
            Err(e) => tracing::debug!("robots.txt unavailable for {}: {}", base, e),
        }

        let ctx = self.ctx;
        for path in &ctx.candidate_paths {
            let url = join_path(base, path);

            // Already fetched as a declared sitemap or index entry: record it, skip the re-fetch
            if let Some(previous) = self.fetched.get(&url) {
                if let Some(final_url) = previous.clone() {
                    self.record.add_sitemap(final_url);
                }
                continue;
            }

            let Some(response) = self.fetch_unvisited(&url).await else {
                continue;
            };

            tracing::debug!("Found sitemap {}", response.final_url);
            self.record.add_sitemap(response.final_url.as_str());
            let children = self.absorb(&response);
            self.follow_index(children).await;
        }
    }

    /// Fetches a declared sitemap and merges its contents
    async fn process_sitemap(&mut self, url: &str) {
        if let Some(response) = self.fetch_unvisited(url).await {
            let children = self.absorb(&response);
            self.follow_index(children).await;
        }
    }

    /// Fetches every index entry once; entries found inside them are recorded
    /// but not fetched
    async fn follow_index(&mut self, children: Vec<String>) {
        for child in children {
            if let Some(response) = self.fetch_unvisited(&child).await {
                self.absorb(&response);
            }
        }
    }

    /// Fetches a URL unless it was already fetched for this domain
    async fn fetch_unvisited(&mut self, url: &str) -> Option<FetchedResponse> {
        if self.fetched.contains_key(url) {
            return None;
        }

        let result = fetch(self.ctx.transport.as_ref(), url, self.ctx.timeout).await;
        match self.track(result) {
            Ok(response) => {
                let final_url = Some(response.final_url.clone());
                self.fetched.insert(url.to_string(), final_url.clone());
                self.fetched
                    .entry(response.final_url.clone())
                    .or_insert(final_url);
                Some(response)
            }
            Err(e) => {
                self.fetched.insert(url.to_string(), None);
                tracing::debug!("Probe failed: {}", e);
                None
            }
        }
    }

    /// Counts an attempt and remembers connection-level failures
    fn track<T>(&mut self, result: Result<T, FetchError>) -> Result<T, FetchError> {
        self.attempts += 1;
        if let Err(e) = &result {
            if e.is_connection_level() {
                self.connection_failures += 1;
                self.last_connection_error = Some(e.clone());
            }
        }
        result
    }

    /// Decodes and parses a fetched sitemap, merging its URLs into the record
    ///
    /// Returns the entries of a sitemap index so the caller can fetch them.
    fn absorb(&mut self, response: &FetchedResponse) -> Vec<String> {
        let decoded = match decode(
            &response.body,
            &response.final_url,
            response.content_type.as_deref(),
        ) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Could not decode {}: {}", response.final_url, e);
                return Vec::new();
            }
        };

        let source = Url::parse(&response.final_url).ok();
        let mut children = Vec::new();

        for text in decoded.texts() {
            let parsed = parse_sitemap_at(text, source.as_ref());
            let is_index = parsed.is_index();
            for url in parsed.into_urls() {
                if is_index {
                    children.push(url.clone());
                }
                self.record.add_nested(url);
            }
        }

        children
    }

    fn finish(self) -> SitemapResult {
        let unreachable = self.record.sitemaps().is_empty()
            && self.attempts > 0
            && self.connection_failures == self.attempts;

        match self.last_connection_error {
            Some(error) if unreachable => {
                let message = DiscoveryError::Unreachable(error).to_string();
                tracing::warn!("{} unreachable: {}", self.record.domain(), message);
                self.record.fail(message)
            }
            _ => self.record.finish(),
        }
    }
}
