//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::stats::{EmptyStatsPolicy, DEFAULT_STATS_TTL_SECS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON document holding the item collection
    pub data_path: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Stats snapshot time-to-live in seconds
    pub stats_ttl: u64,
    /// How stats behave over an empty collection
    pub empty_stats_policy: EmptyStatsPolicy,
    /// Invalidate the stats snapshot when the document changes on disk
    pub watch_data_file: bool,
    /// Create an empty document at startup if none exists
    pub create_if_missing: bool,
    /// Page size used when the client sends no `limit`
    pub default_page_limit: usize,
    /// Largest `limit` a client may request
    pub max_page_limit: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_PATH` - JSON document path (default: data/items.json)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `STATS_TTL_SECS` - Stats snapshot TTL in seconds (default: 300)
    /// - `STATS_EMPTY_POLICY` - `zero` or `reject` (default: zero)
    /// - `WATCH_DATA_FILE` - Watch the document for external edits (default: true)
    /// - `CREATE_IF_MISSING` - Create `[]` document at startup (default: true)
    /// - `DEFAULT_PAGE_LIMIT` - Page size when absent (default: 10)
    /// - `MAX_PAGE_LIMIT` - Upper bound on page size (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: env::var("DATA_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            stats_ttl: parse_var("STATS_TTL_SECS").unwrap_or(defaults.stats_ttl),
            empty_stats_policy: parse_var("STATS_EMPTY_POLICY")
                .unwrap_or(defaults.empty_stats_policy),
            watch_data_file: parse_var("WATCH_DATA_FILE").unwrap_or(defaults.watch_data_file),
            create_if_missing: parse_var("CREATE_IF_MISSING")
                .unwrap_or(defaults.create_if_missing),
            default_page_limit: parse_var::<usize>("DEFAULT_PAGE_LIMIT")
                .filter(|v| *v > 0)
                .unwrap_or(defaults.default_page_limit),
            max_page_limit: parse_var::<usize>("MAX_PAGE_LIMIT")
                .filter(|v| *v > 0)
                .unwrap_or(defaults.max_page_limit),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/items.json"),
            server_port: 3001,
            stats_ttl: DEFAULT_STATS_TTL_SECS as u64,
            empty_stats_policy: EmptyStatsPolicy::Zero,
            watch_data_file: true,
            create_if_missing: true,
            default_page_limit: 10,
            max_page_limit: 100,
        }
    }
}
