//! Store Accessor Module
//!
//! Every operation loads the whole document, applies a pure transform and,
//! for mutations, writes the whole document back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::error::{CatalogError, Result};
use crate::models::{ItemDraft, ItemPatch};
use crate::store::{collection, document, Item};

// == Item Store ==
/// Accessor for one JSON document.
///
/// Mutations run read-transform-write under the write guard, so two
/// overlapping mutations in this process never interleave. Reads share the
/// read guard. Writers in other processes are not excluded.
pub struct ItemStore {
    /// Document path
    path: PathBuf,
    /// Single-writer serialization point for this document
    lock: RwLock<()>,
    /// Time source for id assignment
    clock: Arc<dyn Clock>,
}

impl ItemStore {
    // == Constructor ==
    /// Creates an accessor over `path` using the system clock.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Creates an accessor with an injected clock.
    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
            clock,
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty document if none exists.
    pub async fn ensure_document(&self) -> Result<bool> {
        let _guard = self.lock.write().await;
        document::ensure_document(&self.path).await
    }

    // == Load All ==
    /// Returns the full collection in document order.
    pub async fn load_all(&self) -> Result<Vec<Item>> {
        let _guard = self.lock.read().await;
        document::read_items(&self.path).await
    }

    // == Find By Id ==
    pub async fn find_by_id(&self, id: i64) -> Result<Item> {
        let items = self.load_all().await?;
        collection::position(&items, id)
            .map(|idx| items[idx].clone())
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    // == Search ==
    /// Case-insensitive match on name or category; empty term returns all.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<Item>> {
        let items = self.load_all().await?;
        Ok(collection::search(items, term))
    }

    // == Create ==
    /// Validates `draft`, assigns an id, appends and persists.
    pub async fn create(&self, draft: ItemDraft) -> Result<Item> {
        draft.validate()?;

        let _guard = self.lock.write().await;
        let mut items = document::read_items(&self.path).await?;

        let id = collection::next_id(&items, self.clock.now().timestamp_millis())?;
        let item = Item::from_draft(id, draft);
        items.push(item.clone());

        document::write_items(&self.path, &items).await?;
        info!("Created item {}", item.id);
        Ok(item)
    }

    // == Update ==
    /// Shallow-merges `patch` onto item `id` and persists.
    pub async fn update(&self, id: i64, patch: ItemPatch) -> Result<Item> {
        if let Some(body_id) = patch.id.filter(|body_id| *body_id != id) {
            return Err(CatalogError::Conflict {
                path_id: id,
                body_id,
            });
        }

        let _guard = self.lock.write().await;
        let mut items = document::read_items(&self.path).await?;

        let idx = collection::position(&items, id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        items[idx].apply_patch(&patch);
        let updated = items[idx].clone();

        document::write_items(&self.path, &items).await?;
        info!("Updated item {}", id);
        Ok(updated)
    }

    // == Delete ==
    /// Removes item `id`, persists, and returns the removed record.
    pub async fn delete(&self, id: i64) -> Result<Item> {
        let _guard = self.lock.write().await;
        let mut items = document::read_items(&self.path).await?;

        let idx = collection::position(&items, id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let removed = items.remove(idx);

        document::write_items(&self.path, &items).await?;
        info!("Deleted item {}", id);
        Ok(removed)
    }
}
