//! Page processor: one fetched page in, one record and new links out
//!
//! Processing order for a page:
//! 1. Parse the decoded body (failure skips the page entirely)
//! 2. Run the extractor and hand any record to the sink
//! 3. Discover links, filter them and push the survivors to the frontier
//!
//! Extraction and sink failures are logged and do not stop link discovery.

use crate::crawler::frontier::Frontier;
use crate::crawler::link_filter::LinkFilter;
use crate::crawler::parser::{extract_links, parse_document};
use crate::crawler::visited::VisitedSet;
use crate::extract::Extractor;
use crate::output::{CrawlStats, RecordSink};
use crate::CrawlerError;
use std::sync::Arc;
use url::Url;

/// What processing one page produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOutcome {
    /// A record was extracted and accepted by the sink
    pub record_emitted: bool,
    /// Links pushed to the frontier
    pub links_queued: usize,
}

/// Everything a worker needs to process pages, shared across workers
pub struct PageProcessor<E: Extractor> {
    extractor: Arc<E>,
    sink: Arc<dyn RecordSink<E::Record>>,
    filter: LinkFilter,
    visited: Arc<VisitedSet>,
    frontier: Arc<Frontier>,
    stats: Arc<CrawlStats>,
}

impl<E: Extractor> PageProcessor<E> {
    pub fn new(
        extractor: Arc<E>,
        sink: Arc<dyn RecordSink<E::Record>>,
        filter: LinkFilter,
        visited: Arc<VisitedSet>,
        frontier: Arc<Frontier>,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            extractor,
            sink,
            filter,
            visited,
            frontier,
            stats,
        }
    }

    /// Processes one fetched page
    ///
    /// Must be called while the caller still holds in-flight credit for
    /// `url`, so every push happens before the caller's `mark_done`.
    ///
    /// # Returns
    ///
    /// * `Ok(PageOutcome)` - The page parsed; record and links as reported
    /// * `Err(CrawlerError::Parse)` - The body could not be parsed
    pub fn process(&self, url: &Url, body: &str) -> crate::Result<PageOutcome> {
        let document = parse_document(body).map_err(|message| {
            self.stats.record_parse_failure();
            CrawlerError::Parse {
                url: url.to_string(),
                message,
            }
        })?;

        let mut outcome = PageOutcome::default();

        match self.extractor.extract(url, &document) {
            Ok(record) => match self.sink.write_record(url, &record) {
                Ok(()) => {
                    self.stats.record_emitted();
                    outcome.record_emitted = true;
                }
                Err(e) => {
                    self.stats.record_sink_failure();
                    tracing::error!("Failed to write record from {}: {}", url, e);
                }
            },
            Err(e) => {
                self.stats.record_extraction_failure();
                tracing::debug!("No record extracted from {}: {}", url, e);
            }
        }

        for link in extract_links(&document, url) {
            if self.filter.accept(&link, &self.visited) {
                tracing::trace!("Queueing {}", link);
                if self.frontier.push(link) {
                    outcome.links_queued += 1;
                }
            }
        }
        self.stats.record_links_queued(outcome.links_queued as u64);

        Ok(outcome)
    }
}
