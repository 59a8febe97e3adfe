//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the finder makes:
//! - Building the shared HTTP client with the configured User-Agent
//! - The `Transport` seam that tests replace with in-memory doubles
//! - Single-attempt GET with a per-request timeout
//! - Classification of failures into timeout, connection, and HTTP errors

use crate::config::FinderConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Maximum number of redirects followed for a single request
const MAX_REDIRECTS: usize = 10;

/// Upper bound on the TCP/TLS connect phase
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A response as returned by the transport, before status classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedResponse {
    /// Returns the body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failure of a single probe
///
/// None of these abort a run; the caller decides whether to move on to the
/// next candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("timeout: no response from {url} within {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("connection-error: {url}: {message}")]
    Connection { url: String, message: String },

    #[error("http-error({status_code}): {url}")]
    Http { url: String, status_code: u16 },

    /// The response started but its body could not be read
    #[error("connection-error: {url}: failed to read body: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// Timeouts and network failures, as opposed to the server answering with an error
    pub fn is_connection_level(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::Body { .. }
        )
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. }
            | Self::Connection { url, .. }
            | Self::Http { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Performs a single GET and returns the response regardless of status
///
/// Created once per process and shared by every discovery task.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedResponse, FetchError>;
}

/// Builds an HTTP client with the finder's configuration
///
/// # Arguments
///
/// * `config` - The discovery configuration (user agent and timeout)
///
/// # Example
///
/// ```no_run
/// use sitemap_finder::config::FinderConfig;
/// use sitemap_finder::crawler::build_http_client;
///
/// let client = build_http_client(&FinderConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FinderConfig) -> Result<Client, reqwest::Error> {
    let timeout = config.timeout();

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `Transport` backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Wraps an existing client; `timeout` is only used for error messages
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn from_config(config: &FinderConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?, config.timeout()))
    }

    /// Body read failures are timeouts or `Body` errors, never plain connection errors
    fn classify_body(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            return self.classify(url, error);
        }
        FetchError::Body {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs(),
            }
        } else if error.is_connect() {
            FetchError::Connection {
                url: url.to_string(),
                message: "connection failed".to_string(),
            }
        } else if error.is_redirect() {
            FetchError::Connection {
                url: url.to_string(),
                message: "too many redirects".to_string(),
            }
        } else {
            FetchError::Connection {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_body(url, e))?
            .to_vec();

        Ok(FetchedResponse {
            final_url,
            status_code,
            content_type,
            body,
        })
    }
}

/// Fetches a URL once, enforcing the timeout and requiring a 2xx status
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(FetchedResponse)` |
/// | Any other status | `FetchError::Http` |
/// | No response within `timeout` | `FetchError::Timeout` |
/// | DNS / TLS / network failure | `FetchError::Connection` |
///
/// There are no retries.
pub async fn fetch(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
) -> Result<FetchedResponse, FetchError> {
    let response = match tokio::time::timeout(timeout, transport.get(url)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(FetchError::Timeout {
                url: url.to_string(),
                seconds: timeout.as_secs(),
            })
        }
    };

    if !(200..=299).contains(&response.status_code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            status_code: response.status_code,
        });
    }

    Ok(response)
}
