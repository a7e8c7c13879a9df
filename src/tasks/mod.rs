//! Background Tasks Module
//!
//! Contains background tasks that run alongside the HTTP server.
//!
//! # Tasks
//! - Document watch: invalidates the stats snapshot when the data file changes

mod watcher;

pub use watcher::spawn_watch_task;
