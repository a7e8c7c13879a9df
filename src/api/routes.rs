//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_item_handler, delete_item_handler, get_item_handler, health_handler,
    list_items_handler, stats_handler, update_item_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/items` - List/search items (`q`, `page`, `limit`)
/// - `POST /api/items` - Create an item
/// - `GET /api/items/:id` - Fetch one item
/// - `PUT|PATCH /api/items/:id` - Update an item
/// - `DELETE /api/items/:id` - Delete an item
/// - `GET /api/stats` - Aggregate stats
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, the UI is served separately
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/items",
            get(list_items_handler).post(create_item_handler),
        )
        .route(
            "/api/items/:id",
            get(get_item_handler)
                .put(update_item_handler)
                .patch(update_item_handler)
                .delete(delete_item_handler),
        )
        .route("/api/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
