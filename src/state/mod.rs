//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `WorkerState`: the per-worker state machine driven by the coordinator

mod worker_state;

// Re-export main types
pub use worker_state::WorkerState;
