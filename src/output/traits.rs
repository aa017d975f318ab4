//! Output sink traits and types
//!
//! This module defines the trait interface for record sinks and the error
//! type shared by every sink implementation.

use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record sinks
///
/// Sinks receive records from many workers at once. Implementations must
/// make each `write_record` call atomic: two records are never interleaved.
pub trait RecordSink<R>: Send + Sync {
    /// Writes one record extracted from `url`
    fn write_record(&self, url: &Url, record: &R) -> OutputResult<()>;

    /// Flushes any buffered output at the end of a run
    fn finish(&self) -> OutputResult<()> {
        Ok(())
    }
}

/// Sink that discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl<R> RecordSink<R> for SilentSink {
    fn write_record(&self, _url: &Url, _record: &R) -> OutputResult<()> {
        Ok(())
    }
}
