//! Shared crawl frontier
//!
//! This module handles:
//! - FIFO queueing of URLs waiting to be visited
//! - Blocking dequeue for idle workers
//! - In-flight accounting so the coordinator can tell when the crawl is done
//! - Closing the queue so blocked workers wake up and exit
//!
//! Pending entries, the in-flight count and the closed flag live behind one
//! lock, so a drain check can never interleave with a push, pop or
//! `mark_done`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use url::Url;

#[derive(Debug, Default)]
struct FrontierState {
    pending: VecDeque<Url>,
    in_flight: usize,
    closed: bool,
}

impl FrontierState {
    fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.in_flight == 0
    }
}

/// Unbounded work queue shared by all workers
///
/// Every `pop` that returns a URL hands the caller one unit of in-flight
/// credit, which must be returned with exactly one `mark_done` once the URL
/// has been fully handled, including pushing any links it produced.
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    /// Woken on push and on close
    available: Notify,
    /// Woken when the frontier becomes drained and on close
    drained: Notify,
}

impl Frontier {
    /// Creates an empty, open frontier
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // state stays consistent under panic: every mutation is a single step
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueues a URL without blocking
    ///
    /// # Returns
    ///
    /// * `true` - The URL was queued
    /// * `false` - The frontier is closed and the URL was dropped
    pub fn push(&self, url: Url) -> bool {
        {
            let mut state = self.lock();
            if state.closed {
                return false;
            }
            state.pending.push_back(url);
        }
        self.available.notify_one();
        true
    }

    /// Waits for the next URL
    ///
    /// Returns `None` once the frontier is closed. A returned URL counts as
    /// in flight until `mark_done` is called for it.
    pub async fn pop(&self) -> Option<Url> {
        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            // register before checking so a push between check and await is not lost
            notified.as_mut().enable();

            if let Some(url) = self.try_pop() {
                return Some(url);
            }
            if self.is_closed() {
                return None;
            }

            notified.await;
        }
    }

    /// Takes the next URL if one is pending, without waiting
    pub fn try_pop(&self) -> Option<Url> {
        let url = {
            let mut state = self.lock();
            if state.closed {
                return None;
            }
            let url = state.pending.pop_front()?;
            state.in_flight += 1;
            url
        };

        // more work may remain for other sleepers
        if !self.lock().pending.is_empty() {
            self.available.notify_one();
        }
        Some(url)
    }

    /// Returns the in-flight credit for one popped URL
    pub fn mark_done(&self) {
        let drained = {
            let mut state = self.lock();
            debug_assert!(state.in_flight > 0, "mark_done without a matching pop");
            state.in_flight = state.in_flight.saturating_sub(1);
            state.is_drained()
        };

        if drained {
            self.drained.notify_waiters();
        }
    }

    /// True when nothing is pending and nothing is in flight
    pub fn is_drained(&self) -> bool {
        self.lock().is_drained()
    }

    /// Waits until the frontier is drained or closed
    pub async fn wait_drained(&self) {
        loop {
            let notified = self.drained.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let state = self.lock();
                if state.closed || state.is_drained() {
                    return;
                }
            }

            notified.await;
        }
    }

    /// Permanently closes the frontier and wakes every waiter
    ///
    /// Pending URLs are discarded; later pushes are rejected.
    pub fn close(&self) {
        {
            let mut state = self.lock();
            state.closed = true;
            state.pending.clear();
        }
        self.available.notify_waiters();
        self.drained.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of URLs waiting to be popped
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of URLs popped but not yet marked done
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }
}
