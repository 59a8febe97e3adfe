use crate::config::types::{Config, FinderConfig, OutputConfig, PathsConfig};
use crate::ConfigError;

const MAX_CONCURRENCY: usize = 100;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_finder_config(&config.finder)?;
    validate_output_config(&config.output)?;
    validate_paths_config(&config.paths)?;
    Ok(())
}

/// Validates discovery behavior settings
fn validate_finder_config(config: &FinderConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout must be between 1 and {} seconds, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the extra candidate paths
fn validate_paths_config(config: &PathsConfig) -> Result<(), ConfigError> {
    for path in &config.extra {
        validate_candidate_path(path)?;
    }
    Ok(())
}

/// A candidate path must be absolute and contain no whitespace
fn validate_candidate_path(path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::InvalidPath(format!(
            "'{}' must start with '/'",
            path
        )));
    }

    if path.len() < 2 {
        return Err(ConfigError::InvalidPath(
            "'/' is not a sitemap location".to_string(),
        ));
    }

    if path.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidPath(format!(
            "'{}' contains whitespace",
            path
        )));
    }

    Ok(())
}
