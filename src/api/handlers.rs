//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Duration;
use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{HealthResponse, ItemDraft, ItemPatch, ItemsPage, ListQuery, Pagination};
use crate::stats::{StatsCache, StatsSnapshot};
use crate::store::{collection, Item, ItemStore};

/// Application state shared across all handlers.
///
/// Owns the store and the stats cache built on top of it. Every successful
/// mutation goes through here and invalidates the stats snapshot.
#[derive(Clone)]
pub struct AppState {
    /// Accessor for the JSON document
    pub store: Arc<ItemStore>,
    /// Memoized aggregate stats
    pub stats: Arc<StatsCache>,
    /// Page size when the client sends none
    pub default_page_limit: usize,
    /// Upper bound on client page size
    pub max_page_limit: usize,
}

impl AppState {
    /// Creates a new AppState from configuration using the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new AppState from configuration with an injected clock.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(ItemStore::with_clock(&config.data_path, clock.clone()));
        let stats = Arc::new(StatsCache::new(
            store.clone(),
            clock,
            Duration::seconds(config.stats_ttl.min(i64::MAX as u64 / 1000) as i64),
            config.empty_stats_policy,
        ));
        Self {
            store,
            stats,
            default_page_limit: config.default_page_limit,
            max_page_limit: config.max_page_limit,
        }
    }
}

/// Path ids that are not integers can never match a stored item.
fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CatalogError::NotFound(raw.to_string()))
}

/// Handler for GET /api/items
///
/// Optional `q` filters on name or category; `page` and `limit` slice the
/// matches.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ItemsPage>> {
    let (page, limit) = query.page_and_limit(state.default_page_limit, state.max_page_limit)?;

    let matches = state.store.search(query.term()).await?;
    let total = matches.len();

    Ok(Json(ItemsPage {
        items: collection::paginate(matches, page, limit),
        pagination: Pagination::new(total, page, limit),
    }))
}

/// Handler for GET /api/items/:id
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.find_by_id(id).await?))
}

/// Handler for POST /api/items
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Item>)> {
    let draft = ItemDraft::from_value(&body)?;
    let item = state.store.create(draft).await?;
    state.stats.invalidate();

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for PUT/PATCH /api/items/:id
///
/// Shallow merge; a body `id` that differs from the path is a conflict.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    let patch = ItemPatch::from_value(&body)?;
    let item = state.store.update(id, patch).await?;
    state.stats.invalidate();

    Ok(Json(item))
}

/// Handler for DELETE /api/items/:id
///
/// Returns the removed record.
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    let item = state.store.delete(id).await?;
    state.stats.invalidate();

    Ok(Json(item))
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsSnapshot>> {
    Ok(Json(state.stats.get().await?))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
