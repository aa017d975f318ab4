//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the controller and the worker loop:
//! - Building the per-run frontier, visited set and statistics
//! - Seeding the frontier and spawning a fixed pool of workers
//! - Waiting for the frontier to drain (or a shutdown signal)
//! - Cancelling, joining and summarizing the run

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, FetchClient};
use crate::crawler::frontier::Frontier;
use crate::crawler::link_filter::LinkFilter;
use crate::crawler::processor::PageProcessor;
use crate::crawler::visited::VisitedSet;
use crate::extract::Extractor;
use crate::output::{CrawlStats, CrawlSummary, RecordSink};
use crate::state::WorkerState;
use crate::url::{parse_origin, LinkPattern};
use crate::ConfigError;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// How often the controller logs progress while waiting for the drain
const PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Shared, read-only view handed to every worker
struct WorkerContext<E: Extractor> {
    frontier: Arc<Frontier>,
    visited: Arc<VisitedSet>,
    stats: Arc<CrawlStats>,
    client: FetchClient,
    processor: PageProcessor<E>,
}

/// Main crawler coordinator structure
///
/// One coordinator drives exactly one run over one seed origin.
pub struct Coordinator<E: Extractor> {
    seed: Url,
    workers: usize,
    frontier: Arc<Frontier>,
    visited: Arc<VisitedSet>,
    stats: Arc<CrawlStats>,
    sink: Arc<dyn RecordSink<E::Record>>,
    context: Arc<WorkerContext<E>>,
    shutdown: CancellationToken,
}

impl<E> Coordinator<E>
where
    E: Extractor + 'static,
    E::Record: 'static,
{
    /// Creates a new coordinator instance
    ///
    /// Validates the configuration, resolves the seed origin and builds the
    /// HTTP client. Nothing is fetched until [`Coordinator::run`].
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed_url` - Absolute http(s) URL the crawl starts from
    /// * `extractor` - Turns fetched pages into records
    /// * `sink` - Receives every extracted record
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlerError::Config)` - Invalid configuration or seed URL
    pub fn new(
        config: &Config,
        seed_url: &str,
        extractor: E,
        sink: Arc<dyn RecordSink<E::Record>>,
    ) -> crate::Result<Self> {
        validate(config)?;

        let (seed, seed_origin) = parse_origin(seed_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", seed_url, e)))?;
        let pattern = LinkPattern::new(&config.crawler.link_pattern)?;
        let client = FetchClient::new(build_http_client(&config.user_agent, &config.crawler)?);

        tracing::debug!(
            "Seed origin {} with link pattern {}",
            seed_origin,
            pattern
        );

        let frontier = Arc::new(Frontier::new());
        let visited = Arc::new(VisitedSet::new());
        let stats = Arc::new(CrawlStats::new());

        let processor = PageProcessor::new(
            Arc::new(extractor),
            Arc::clone(&sink),
            LinkFilter::new(pattern, seed_origin),
            Arc::clone(&visited),
            Arc::clone(&frontier),
            Arc::clone(&stats),
        );

        let context = Arc::new(WorkerContext {
            frontier: Arc::clone(&frontier),
            visited: Arc::clone(&visited),
            stats: Arc::clone(&stats),
            client,
            processor,
        });

        Ok(Self {
            seed,
            workers: config.crawler.workers,
            frontier,
            visited,
            stats,
            sink,
            context,
            shutdown: CancellationToken::new(),
        })
    }

    /// Token that stops the run early when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Runs the crawl until the frontier drains or Ctrl-C is received
    pub async fn run(self) -> crate::Result<CrawlSummary> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Could not listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Runs the crawl until the frontier drains or `shutdown` completes
    ///
    /// Either way every worker is cancelled and joined before the summary is
    /// returned, so no record is written after this resolves.
    pub async fn run_until<F>(self, shutdown: F) -> crate::Result<CrawlSummary>
    where
        F: Future<Output = ()>,
    {
        let started_at = Utc::now();
        tracing::info!(
            "Starting crawl of {} with {} workers",
            self.seed,
            self.workers
        );

        self.frontier.push(self.seed.clone());

        let mut workers = JoinSet::new();
        for id in 0..self.workers {
            let context = Arc::clone(&self.context);
            let token = self.shutdown.child_token();
            workers.spawn(worker_loop(id, context, token));
        }

        tokio::pin!(shutdown);
        let mut progress = tokio::time::interval(PROGRESS_INTERVAL);
        progress.tick().await;

        loop {
            tokio::select! {
                _ = self.frontier.wait_drained() => {
                    tracing::info!("Frontier drained, crawl complete");
                    break;
                }
                _ = &mut shutdown => {
                    tracing::warn!("Shutdown requested, cancelling workers");
                    break;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::warn!("Crawl cancelled");
                    break;
                }
                _ = progress.tick() => {
                    tracing::info!(
                        "Progress: {} pages claimed, {} in frontier, {} in flight",
                        self.stats.pages_claimed(),
                        self.frontier.pending_len(),
                        self.frontier.in_flight()
                    );
                }
            }
        }

        self.shutdown.cancel();
        self.frontier.close();

        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Worker task failed: {}", e);
                failure.get_or_insert(e);
            }
        }
        if let Some(e) = failure {
            return Err(e.into());
        }

        self.sink.finish()?;

        let summary = self.stats.snapshot(started_at, Utc::now());
        tracing::debug!("Visited set holds {} URLs", self.visited.len());
        Ok(summary)
    }
}

fn transition(id: usize, state: &mut WorkerState, next: WorkerState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal worker transition {} -> {}",
        state,
        next
    );
    tracing::trace!("Worker {}: {} -> {}", id, state, next);
    *state = next;
}

/// One worker: pop, claim, fetch, process, repeat
///
/// Every popped entry is returned with exactly one `mark_done`, including
/// when the fetch is cut short by cancellation.
async fn worker_loop<E: Extractor>(
    id: usize,
    context: Arc<WorkerContext<E>>,
    token: CancellationToken,
) {
    let mut state = WorkerState::Idle;

    loop {
        let url = tokio::select! {
            _ = token.cancelled() => break,
            next = context.frontier.pop() => match next {
                Some(url) => url,
                None => break,
            },
        };

        transition(id, &mut state, WorkerState::Claiming);
        if !context.visited.claim(&url) {
            context.stats.record_duplicate();
            context.frontier.mark_done();
            transition(id, &mut state, WorkerState::Idle);
            continue;
        }
        context.stats.record_claimed();

        transition(id, &mut state, WorkerState::Fetching);
        tracing::debug!("Worker {} fetching {}", id, url);
        let fetched = tokio::select! {
            _ = token.cancelled() => {
                context.frontier.mark_done();
                break;
            }
            result = context.client.fetch(url.as_str()) => result,
        };

        match fetched {
            Ok(body) => {
                context.stats.record_fetched();
                transition(id, &mut state, WorkerState::Processing);
                match context.processor.process(&url, &body) {
                    Ok(outcome) => tracing::debug!(
                        "Processed {} (record: {}, links queued: {})",
                        url,
                        outcome.record_emitted,
                        outcome.links_queued
                    ),
                    Err(e) => tracing::debug!("Skipping page: {}", e),
                }
            }
            Err(e) => {
                context.stats.record_fetch_failure();
                tracing::debug!("Fetch failed: {}", e);
            }
        }

        context.frontier.mark_done();
        transition(id, &mut state, WorkerState::Idle);
    }

    transition(id, &mut state, WorkerState::Cancelled);
}
