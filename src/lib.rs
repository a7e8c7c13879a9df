//! Item Catalog - A small catalog service over a single JSON document
//!
//! Provides CRUD over items with whole-document persistence, and aggregate
//! stats memoized for a fixed window.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_watch_task;
