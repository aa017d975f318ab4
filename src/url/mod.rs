//! URL handling module
//!
//! This module provides origin computation, link resolution and the path
//! pattern that decides which links are worth following.

mod matcher;
mod normalize;
mod origin;

// Re-export main functions
pub use matcher::{LinkPattern, DEFAULT_LINK_PATTERN};
pub use normalize::resolve_link;
pub use origin::{origin_of, parse_origin, same_origin, Origin};
