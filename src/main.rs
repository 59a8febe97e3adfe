//! Sitemap Finder main entry point
//!
//! This is the command-line interface for batch sitemap discovery.

use anyhow::Context;
use clap::Parser;
use sitemap_finder::config::{load_config_with_hash, validate, Config};
use sitemap_finder::crawler::discover_all;
use sitemap_finder::input::read_domains;
use sitemap_finder::output::{print_summary, summarize, write_report_file, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemap Finder: batch sitemap discovery
///
/// Reads a list of domains, looks up the sitemaps each one declares in
/// robots.txt or serves at well-known paths, opens compressed and indexed
/// sitemaps, and writes one result row per domain.
#[derive(Parser, Debug)]
#[command(name = "sitemap-finder")]
#[command(version = "1.0.0")]
#[command(about = "Discover sitemaps for a list of domains", long_about = None)]
struct Cli {
    /// Text file with one domain per line
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Report base name; the format extension is appended
    #[arg(short, long, value_name = "NAME")]
    output: Option<String>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Number of domains probed at the same time
    #[arg(short, long, value_name = "N")]
    concurrency: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Also probe the other scheme (http <-> https) of every domain
    #[arg(long)]
    both_schemes: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    let domains = read_domains(&cli.input)
        .with_context(|| format!("cannot start without input file {}", cli.input.display()))?;
    tracing::info!(
        "Loaded {} domain(s) from {}",
        domains.len(),
        cli.input.display()
    );

    let results = discover_all(&config, domains)
        .await
        .context("failed to initialize HTTP client")?;

    let path = write_report_file(&results, &config.output.path, config.output.format)
        .context("failed to write report")?;

    if !cli.quiet {
        print_summary(&summarize(&results));
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}

/// Builds the effective configuration: defaults, then the config file, then CLI flags
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("invalid config file {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.finder.timeout_secs = timeout;
    }
    if let Some(concurrency) = cli.concurrency {
        config.finder.concurrency = concurrency;
    }
    if cli.both_schemes {
        config.finder.probe_both_schemes = true;
    }

    validate(&config).context("invalid command-line options")?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_finder=info,warn"),
            1 => EnvFilter::new("sitemap_finder=debug,info"),
            2 => EnvFilter::new("sitemap_finder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
