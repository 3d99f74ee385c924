//! API Routes
//!
//! Configures the Axum router with all key/value server endpoints.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, fetch_handler, health_handler, list_handler, stats_handler,
    upsert_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /records` - List every record
/// - `POST /records` - Create or update a record
/// - `DELETE /records` - Remove every record
/// - `GET /records/:key` - Fetch a record, creating it if missing
/// - `DELETE /records/:key` - Remove a record
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/records",
            get(list_handler).post(upsert_handler).delete(clear_handler),
        )
        .route("/records/:key", get(fetch_handler).delete(delete_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
