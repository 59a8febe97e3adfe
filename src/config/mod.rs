//! Configuration module for Sitemap Finder
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every field has a default, so a run without a config
//! file behaves exactly like one with an empty file.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_finder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("finder.toml")).unwrap();
//! println!("Probing with concurrency: {}", config.finder.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FinderConfig, OutputConfig, PathsConfig, DEFAULT_CONCURRENCY, DEFAULT_OUTPUT_NAME,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
