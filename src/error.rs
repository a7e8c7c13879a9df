//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

// == Field Violation ==
/// A single field that failed validation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// == Catalog Error Enum ==
/// Unified error type for the catalog service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Backing document could not be read, parsed or written
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// No item with the requested id
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Patch carries an id that disagrees with the path id
    #[error("Id mismatch: path id {path_id} but body id {body_id}")]
    Conflict { path_id: i64, body_id: i64 },

    /// Draft or patch failed validation
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldViolation>),

    /// Stats requested over an empty collection
    #[error("Cannot compute stats over an empty collection")]
    EmptyCollection,

    /// Malformed query parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

fn join_fields(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Conflict { .. } => StatusCode::CONFLICT,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::EmptyCollection => StatusCode::NOT_FOUND,
            CatalogError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = match &self {
            CatalogError::Validation(fields) => Json(json!({
                "error": "Validation failed",
                "fields": fields,
            })),
            other => Json(json!({
                "error": other.to_string()
            })),
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog service.
pub type Result<T> = std::result::Result<T, CatalogError>;
