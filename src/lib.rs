//! Sitemap Finder: batch sitemap discovery for lists of domains
//!
//! This crate probes well-known sitemap locations, reads `Sitemap:` directives
//! from robots.txt, decompresses gzip and zip sitemap archives, and extracts
//! the URLs nested inside them. One [`SitemapResult`] is produced per input domain.

pub mod config;
pub mod crawler;
pub mod input;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemap Finder operations
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read input file {path}: {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid candidate path in config: {0}")]
    InvalidPath(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Empty domain")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sitemap Finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_all, DiscoveryContext, ReqwestTransport, Transport};
pub use state::{DomainStatus, SitemapResult};
pub use url::normalize_domain;
