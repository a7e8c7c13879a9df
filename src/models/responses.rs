//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies. Items and stats
//! snapshots are returned as-is; only listing and health need wrappers.

use serde::Serialize;

use crate::store::Item;

/// Pagination metadata for GET /api/items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of matching items before slicing
    pub total: usize,
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// ceil(total / limit)
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(total: usize, page: usize, limit: usize) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// Response body for GET /api/items
#[derive(Debug, Clone, Serialize)]
pub struct ItemsPage {
    pub items: Vec<Item>,
    pub pagination: Pagination,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
