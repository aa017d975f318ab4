use serde::Deserialize;

use crate::url::DEFAULT_LINK_PATTERN;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 5;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default file that receives saved records
pub const DEFAULT_OUTPUT_PATH: &str = "crawler_recipes.json";

/// Main configuration structure
///
/// Every section and field has a default, so an empty TOML file (or no file
/// at all) yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of concurrent workers sharing the frontier
    pub workers: usize,

    /// Regular expression a link's path must match to be followed
    #[serde(rename = "link-pattern")]
    pub link_pattern: String,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "recipe-crawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Where extracted records go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Pretty-print each record through the log
    Log,
    /// Append each record as one JSON line to the output file
    Save,
    /// Discard records
    #[default]
    Silent,
}

impl OutputMode {
    /// Derives the mode from the `--verbose` / `--save` flags
    ///
    /// Verbose wins when both are given.
    pub fn from_flags(verbose: bool, save: bool) -> Self {
        if verbose {
            Self::Log
        } else if save {
            Self::Save
        } else {
            Self::Silent
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Record output mode
    pub mode: OutputMode,

    /// Path of the JSON Lines file used in save mode
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}
