//! JSON Lines output sink
//!
//! Each record becomes one line holding one complete JSON object. The file is
//! truncated when the sink is created, so every run starts from an empty file.

use crate::output::traits::{OutputError, OutputResult, RecordSink};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use url::Url;

/// Appends one JSON object per line to a file
pub struct JsonLinesSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesSink {
    /// Creates (or truncates) the output file
    ///
    /// # Arguments
    ///
    /// * `path` - Where records are written
    ///
    /// # Returns
    ///
    /// * `Ok(JsonLinesSink)` - The file is open and empty
    /// * `Err(OutputError)` - The file could not be created
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        tracing::debug!("Writing records to {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl<R: Serialize> RecordSink<R> for JsonLinesSink {
    fn write_record(&self, _url: &Url, record: &R) -> OutputResult<()> {
        // serialize outside the lock; only the write is serialized
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }

    fn finish(&self) -> OutputResult<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer
            .flush()
            .map_err(|e| OutputError::Write(format!("{}: {}", self.path.display(), e)))
    }
}
