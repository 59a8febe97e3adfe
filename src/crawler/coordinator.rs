//! Crawler coordinator - runs discovery for every input domain
//!
//! This module owns the concurrency model of a run:
//! - One spawned task per domain, gated by a counting semaphore
//! - A shared progress counter, the only state tasks have in common
//! - Results collected in input order, not completion order
//! - Panics inside a domain task converted to that domain's error row

use crate::crawler::strategy::{discover_domain, DiscoveryContext, DiscoveryError};
use crate::state::SitemapResult;
use crate::url::normalize_domain;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Main coordinator structure
pub struct Coordinator {
    context: Arc<DiscoveryContext>,
    concurrency: usize,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `context` - Transport, timeout and candidate paths shared by every task
    /// * `concurrency` - Maximum number of domains in flight (at least 1)
    pub fn new(context: Arc<DiscoveryContext>, concurrency: usize) -> Self {
        Self {
            context,
            concurrency: concurrency.max(1),
        }
    }

    /// Discovers sitemaps for every domain
    ///
    /// Returns exactly one result per input, in input order. A failing or
    /// panicking domain never affects its siblings.
    pub async fn run(&self, domains: Vec<String>) -> Vec<SitemapResult> {
        let total = domains.len();
        let start_time = Instant::now();
        tracing::info!(
            "Starting discovery for {} domain(s), concurrency {}",
            total,
            self.concurrency
        );

        let gate = Arc::new(Semaphore::new(self.concurrency));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(total);

        for domain in domains {
            let gate = Arc::clone(&gate);
            let context = Arc::clone(&self.context);
            let completed = Arc::clone(&completed);
            let input = domain.clone();

            let handle = tokio::spawn(async move {
                let _permit = gate
                    .acquire_owned()
                    .await
                    .map_err(|e| DiscoveryError::Internal(e.to_string()))?;

                let result = discover_domain(&context, &input).await;

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::info!(
                    "Progress: {}/{} domains ({}: {} sitemap(s), {} nested URL(s), {})",
                    done,
                    total,
                    result.domain,
                    result.sitemaps.len(),
                    result.nested_urls.len(),
                    result.status
                );

                Ok::<_, DiscoveryError>(result)
            });

            handles.push((domain, handle));
        }

        let mut results = Vec::with_capacity(total);
        for (domain, handle) in handles {
            let result = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => failed_row(&domain, e),
                Err(e) => {
                    tracing::error!("Discovery task for {} failed: {}", domain.trim(), e);
                    failed_row(&domain, DiscoveryError::Internal(e.to_string()))
                }
            };
            results.push(result);
        }

        tracing::info!(
            "Discovery completed: {} domain(s) in {:?}",
            total,
            start_time.elapsed()
        );

        results
    }
}

/// Runs discovery for every domain with at most `concurrency` in flight
pub async fn run_all(
    context: Arc<DiscoveryContext>,
    domains: Vec<String>,
    concurrency: usize,
) -> Vec<SitemapResult> {
    Coordinator::new(context, concurrency).run(domains).await
}

fn failed_row(input: &str, error: DiscoveryError) -> SitemapResult {
    let domain = normalize_domain(input).unwrap_or_else(|_| input.trim().to_string());
    SitemapResult::error(domain, error.to_string())
}
