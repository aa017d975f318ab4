//! Output module for extracted records and crawl statistics
//!
//! This module handles:
//! - Writing records as JSON Lines or to the log
//! - Recording crawl statistics and the end-of-run summary

mod jsonl;
mod log_sink;
pub mod stats;
mod traits;

pub use jsonl::JsonLinesSink;
pub use log_sink::LogSink;
pub use stats::{print_summary, CrawlStats, CrawlSummary};
pub use traits::{OutputError, OutputResult, RecordSink, SilentSink};

use crate::config::{OutputConfig, OutputMode};
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

/// Builds the sink selected by the output configuration
///
/// In save mode the output file is created (or truncated) here, before any
/// worker starts.
pub fn build_sink<R>(config: &OutputConfig) -> OutputResult<Arc<dyn RecordSink<R>>>
where
    R: Serialize + Debug + 'static,
{
    let sink: Arc<dyn RecordSink<R>> = match config.mode {
        OutputMode::Log => Arc::new(LogSink),
        OutputMode::Save => Arc::new(JsonLinesSink::create(Path::new(&config.path))?),
        OutputMode::Silent => Arc::new(SilentSink),
    };
    Ok(sink)
}
