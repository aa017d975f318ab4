//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Command-line flags are layered on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use recipe_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, OutputMode, UserAgentConfig, DEFAULT_OUTPUT_PATH,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WORKERS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
