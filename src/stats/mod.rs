//! Stats Module
//!
//! Aggregate statistics over the catalog with a time-boxed memo.

mod cache;
mod snapshot;

// Re-export public types
pub use cache::{StatsCache, DEFAULT_STATS_TTL_SECS};
pub use snapshot::{EmptyStatsPolicy, StatsSnapshot};
