//! Log output sink
//!
//! Pretty-prints every record through `tracing` at info level. Tracing
//! emits one event per call, so records from different workers never mix.

use crate::output::traits::{OutputResult, RecordSink};
use std::fmt::Debug;
use url::Url;

/// Logs each record in `{:#?}` form
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl<R: Debug> RecordSink<R> for LogSink {
    fn write_record(&self, url: &Url, record: &R) -> OutputResult<()> {
        tracing::info!("Record from {}:\n{:#?}", url, record);
        Ok(())
    }
}
