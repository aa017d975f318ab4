//! Recipe-Crawler main entry point
//!
//! This is the command-line interface for the recipe crawler.

use anyhow::{Context, Result};
use clap::Parser;
use recipe_crawler::config::{load_config, validate, Config, OutputMode};
use recipe_crawler::crawler::crawl;
use recipe_crawler::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Recipe-Crawler: a concurrent single-site recipe crawler
///
/// Starts from a seed page, follows same-origin links whose path matches
/// the link pattern, and extracts a recipe from every page it visits.
#[derive(Parser, Debug)]
#[command(name = "recipe-crawler")]
#[command(version)]
#[command(about = "A concurrent single-site recipe crawler", long_about = None)]
struct Cli {
    /// Seed URL the crawl starts from
    #[arg(long)]
    url: String,

    /// Number of concurrent workers [default: 5]
    #[arg(long)]
    workers: Option<usize>,

    /// Log every extracted record and enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Save extracted records as JSON Lines
    #[arg(long)]
    save: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Regular expression a link's path must match to be followed
    #[arg(long)]
    pattern: Option<String>,

    /// File that receives saved records
    #[arg(long)]
    output: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = build_config(&cli)?;
    tracing::info!(
        "Output mode: {:?}, link pattern: {}",
        config.output.mode,
        config.crawler.link_pattern
    );

    let summary = crawl(config, &cli.url)
        .await
        .with_context(|| format!("Crawl of {} failed", cli.url))?;

    print_summary(&summary);
    Ok(())
}

/// Sets up the tracing subscriber; `RUST_LOG` takes precedence
fn setup_logging(verbose: bool) {
    let default_filter = if verbose {
        "recipe_crawler=debug,info"
    } else {
        "recipe_crawler=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if given, then layers command-line flags on top
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(pattern) = &cli.pattern {
        config.crawler.link_pattern = pattern.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if cli.verbose || cli.save {
        config.output.mode = OutputMode::from_flags(cli.verbose, cli.save);
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
