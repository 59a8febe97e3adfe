use crate::output::OutputFormat;
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of domains probed at the same time
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default report base name (the format extension is appended)
pub const DEFAULT_OUTPUT_NAME: &str = "sitemaps_output";

/// Browser-like User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Main configuration structure for Sitemap Finder
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub finder: FinderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Discovery behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FinderConfig {
    /// Timeout for each individual HTTP request (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of domains in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Also probe the alternate scheme (http <-> https) of every domain
    #[serde(default)]
    pub probe_both_schemes: bool,
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputConfig {
    /// Report base name; the format extension is appended when missing
    #[serde(default = "default_output_name")]
    pub path: String,

    /// Report format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Extra candidate paths appended after the built-in list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    #[serde(default)]
    pub extra: Vec<String>,
}

impl FinderConfig {
    /// Returns the per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            probe_both_schemes: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_NAME.to_string(),
            format: OutputFormat::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_output_name() -> String {
    DEFAULT_OUTPUT_NAME.to_string()
}
