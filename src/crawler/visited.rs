//! Visited set: the authority on who owns a URL
//!
//! The frontier may hold duplicates; the atomic `claim` here is what
//! guarantees a URL is fetched at most once per run.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use url::Url;

/// The set of URLs already claimed for visiting in this run
#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.claimed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically claims a URL
    ///
    /// # Returns
    ///
    /// * `true` - The caller now owns this visit
    /// * `false` - Another caller already claimed it
    pub fn claim(&self, url: &Url) -> bool {
        self.lock().insert(url.as_str().to_string())
    }

    /// Returns true if the URL has been claimed
    ///
    /// The answer may be stale by the time the caller acts on it.
    pub fn contains(&self, url: &Url) -> bool {
        self.lock().contains(url.as_str())
    }

    /// Number of claimed URLs
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
