//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/items` - List/search items with pagination
//! - `POST /api/items` - Create an item
//! - `GET /api/items/:id` - Fetch one item
//! - `PUT|PATCH /api/items/:id` - Update an item
//! - `DELETE /api/items/:id` - Delete an item
//! - `GET /api/stats` - Aggregate stats
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
