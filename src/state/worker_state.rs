/// Worker state definitions for tracking crawl progress
///
/// Each worker cycles `Idle → Claiming → Fetching → Processing → Idle` and
/// can be moved to `Cancelled` from anywhere by the coordinator.
use std::fmt;

/// Represents the current state of one crawl worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Waiting on the frontier for the next URL
    Idle,

    /// Holding a URL and trying to claim it in the visited set
    Claiming,

    /// Owns a URL and is waiting on the network
    Fetching,

    /// Parsing, extracting and discovering links for a fetched page
    Processing,

    /// Stopped by the coordinator; terminal
    Cancelled,
}

impl WorkerState {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        match (self, next) {
            (Self::Cancelled, _) => false,
            (_, Self::Cancelled) => true,
            (Self::Idle, Self::Claiming) => true,
            (Self::Claiming, Self::Fetching | Self::Idle) => true,
            (Self::Fetching, Self::Processing | Self::Idle) => true,
            (Self::Processing, Self::Idle) => true,
            _ => false,
        }
    }

    /// Short lowercase label used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Claiming => "claiming",
            Self::Fetching => "fetching",
            Self::Processing => "processing",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
