//! Crawl statistics
//!
//! Workers bump lock-free counters as they go; the coordinator takes a
//! [`CrawlSummary`] snapshot when the run ends.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared by all workers of one run
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_claimed: AtomicU64,
    duplicates_skipped: AtomicU64,
    pages_fetched: AtomicU64,
    fetch_failures: AtomicU64,
    parse_failures: AtomicU64,
    extraction_failures: AtomicU64,
    records_emitted: AtomicU64,
    sink_failures: AtomicU64,
    links_queued: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_claimed(&self) {
        self.pages_claimed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_parse_failure(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_extraction_failure(&self) {
        self.extraction_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_emitted(&self) {
        self.records_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sink_failure(&self) {
        self.sink_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_links_queued(&self, count: u64) {
        self.links_queued.fetch_add(count, Ordering::Relaxed);
    }

    /// Number of pages claimed so far
    pub fn pages_claimed(&self) -> u64 {
        self.pages_claimed.load(Ordering::Relaxed)
    }

    /// Freezes the counters into a summary
    pub fn snapshot(&self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> CrawlSummary {
        CrawlSummary {
            started_at,
            finished_at,
            pages_claimed: self.pages_claimed.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            records_emitted: self.records_emitted.load(Ordering::Relaxed),
            sink_failures: self.sink_failures.load(Ordering::Relaxed),
            links_queued: self.links_queued.load(Ordering::Relaxed),
        }
    }
}

/// Summary statistics for a finished crawl
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// URLs this run took ownership of
    pub pages_claimed: u64,
    /// Frontier entries dropped because another worker owned the URL
    pub duplicates_skipped: u64,
    pub pages_fetched: u64,
    pub fetch_failures: u64,
    pub parse_failures: u64,
    pub extraction_failures: u64,
    pub records_emitted: u64,
    pub sink_failures: u64,
    pub links_queued: u64,
}

impl CrawlSummary {
    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Pages fetched per second over the whole run
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.duration_seconds();
        if secs <= 0.0 {
            return 0.0;
        }
        self.pages_fetched as f64 / secs
    }
}

/// Logs a crawl summary at info level
pub fn print_summary(summary: &CrawlSummary) {
    tracing::info!(
        "Crawl finished in {:.2}s ({:.2} pages/sec)",
        summary.duration_seconds(),
        summary.pages_per_second()
    );
    tracing::info!(
        "Pages: {} claimed, {} fetched, {} duplicates skipped",
        summary.pages_claimed,
        summary.pages_fetched,
        summary.duplicates_skipped
    );
    tracing::info!(
        "Failures: {} fetch, {} parse, {} extraction, {} sink",
        summary.fetch_failures,
        summary.parse_failures,
        summary.extraction_failures,
        summary.sink_failures
    );
    tracing::info!(
        "Records emitted: {}, links queued: {}",
        summary.records_emitted,
        summary.links_queued
    );
}
