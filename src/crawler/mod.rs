//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The shared frontier and visited set
//! - HTTP fetching without retries
//! - HTML parsing, extraction and link discovery
//! - Worker pool coordination

mod coordinator;
mod fetcher;
mod frontier;
mod link_filter;
mod parser;
mod processor;
mod visited;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchClient};
pub use frontier::Frontier;
pub use link_filter::LinkFilter;
pub use parser::{extract_links, parse_document};
pub use processor::{PageOutcome, PageProcessor};
pub use visited::VisitedSet;

use crate::config::Config;
use crate::extract::RecipeExtractor;
use crate::output::{build_sink, CrawlSummary};

/// Runs a complete recipe crawl from `seed_url`
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and seed URL
/// 2. Open the sink selected by the output configuration
/// 3. Crawl until the frontier drains or Ctrl-C is received
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl finished
/// * `Err(CrawlerError)` - Invalid configuration or unusable output
pub async fn crawl(config: Config, seed_url: &str) -> crate::Result<CrawlSummary> {
    let sink = build_sink(&config.output)?;
    let coordinator = Coordinator::new(&config, seed_url, RecipeExtractor::new(), sink)?;
    coordinator.run().await
}
