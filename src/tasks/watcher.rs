//! Document Watch Task
//!
//! Background task that invalidates the stats snapshot whenever the backing
//! document changes on disk, including edits made outside this process.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::stats::StatsCache;

/// Spawns a task watching `path` and invalidating `stats` on change.
///
/// The parent directory is watched rather than the file itself, because the
/// store replaces the document by rename and a watch on the old inode would
/// go quiet after the first write.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown. Fails if the OS watcher cannot be set up.
pub fn spawn_watch_task(path: PathBuf, stats: Arc<StatsCache>) -> notify::Result<JoinHandle<()>> {
    let dir = watch_dir(&path);
    let file_name = path.file_name().map(|n| n.to_os_string());

    let (tx, mut rx) = mpsc::unbounded_channel();

    // OS watcher -> async bridge
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Err(e) = tx.send(res) {
                error!("Failed to forward file watcher event: {}", e);
            }
        },
        notify::Config::default(),
    )?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    info!("Watching {} for changes", path.display());

    Ok(tokio::spawn(async move {
        // Dropping the watcher stops event delivery
        let _watcher = watcher;

        while let Some(res) = rx.recv().await {
            match res {
                Ok(event) if touches_document(&event, file_name.as_ref()) => {
                    info!("Data file changed, invalidating stats cache");
                    stats.invalidate();
                }
                Ok(event) => debug!("Ignoring watcher event {:?}", event.kind),
                Err(e) => error!("File watcher error: {}", e),
            }
        }
    }))
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn touches_document(event: &Event, file_name: Option<&OsString>) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().map(|n| n.to_os_string()).as_ref() == file_name)
}
