//! Link filter: which discovered links are worth queueing
//!
//! A link is accepted when it matches the crawl's path pattern, stays on the
//! seed origin, and has not been claimed yet. The visited check is a cheap
//! pre-filter against flooding the frontier; it races with concurrent claims
//! and duplicates can still slip through to the visited set's `claim`.

use crate::crawler::visited::VisitedSet;
use crate::url::{origin_of, LinkPattern, Origin};
use url::Url;

/// Decides whether a discovered link should be enqueued
#[derive(Debug, Clone)]
pub struct LinkFilter {
    pattern: LinkPattern,
    seed_origin: Origin,
}

impl LinkFilter {
    /// Creates a filter bound to one crawl's pattern and seed origin
    pub fn new(pattern: LinkPattern, seed_origin: Origin) -> Self {
        Self {
            pattern,
            seed_origin,
        }
    }

    /// Returns true iff the link matches the pattern, shares the seed origin
    /// and is not in `visited`
    pub fn accept(&self, candidate: &Url, visited: &VisitedSet) -> bool {
        if !self.pattern.matches(candidate) {
            return false;
        }

        match origin_of(candidate) {
            Ok(origin) if origin == self.seed_origin => {}
            _ => return false,
        }

        !visited.contains(candidate)
    }
}
