//! Document Module
//!
//! Whole-file read and write of the JSON document.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::{CatalogError, Result};
use crate::store::Item;

// == Read ==
/// Reads and parses the full collection.
///
/// Fails only when the file cannot be read, is not a JSON array of objects,
/// or holds a record without an integer `id`. Other fields are optional.
pub async fn read_items(path: &Path) -> Result<Vec<Item>> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        CatalogError::StoreUnavailable(format!("failed to read {}: {}", path.display(), e))
    })?;

    let items: Vec<Item> = serde_json::from_str(&raw).map_err(|e| {
        error!("Malformed document {}: {}", path.display(), e);
        CatalogError::StoreUnavailable(format!("malformed document {}: {}", path.display(), e))
    })?;

    debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

// == Write ==
/// Replaces the document with `items`.
///
/// Writes a sibling temp file then renames it over the document, so a
/// failure leaves the previous contents in place.
pub async fn write_items(path: &Path, items: &[Item]) -> Result<()> {
    let data = serde_json::to_string_pretty(items).map_err(|e| {
        CatalogError::StoreUnavailable(format!("failed to serialize collection: {}", e))
    })?;

    let temp_path = temp_path(path);
    if let Err(e) = tokio::fs::write(&temp_path, data.as_bytes()).await {
        error!("Failed to write {}: {}", temp_path.display(), e);
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(CatalogError::StoreUnavailable(format!(
            "failed to write {}: {}",
            temp_path.display(),
            e
        )));
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        error!("Failed to replace {}: {}", path.display(), e);
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(CatalogError::StoreUnavailable(format!(
            "failed to replace {}: {}",
            path.display(),
            e
        )));
    }

    debug!("Wrote {} items to {}", items.len(), path.display());
    Ok(())
}

// == Ensure ==
/// Creates an empty document (and parent directories) if none exists.
///
/// Returns true when a new document was created.
pub async fn ensure_document(path: &Path) -> Result<bool> {
    let exists = tokio::fs::try_exists(path).await.map_err(|e| {
        error!("Failed to check {}: {}", path.display(), e);
        CatalogError::StoreUnavailable(format!("failed to check {}: {}", path.display(), e))
    })?;
    if exists {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            CatalogError::StoreUnavailable(format!(
                "failed to create {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    write_items(path, &[]).await?;
    Ok(true)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "items.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
