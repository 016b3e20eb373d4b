//! HTTP route handlers.
//!
//! The four endpoints are registered as exact-match routes; everything else
//! hits the fallback and gets an empty 404. Request logging is enabled via
//! middleware that generates a unique request ID per request.

pub mod health;
pub mod status;
pub mod uptime;

use axum::{http::StatusCode, middleware, routing::get, Router};

use crate::middleware::request_log_layer;
use crate::state::AppState;

/// Root endpoint handler.
///
/// A bare liveness ping: an empty 204 with no headers beyond the framework
/// defaults.
async fn root() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Fallback for paths outside the route table: empty 404.
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Creates the Axum router with all routes and the request-logging layer.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health))
        .route("/status", get(status::status))
        .route("/uptime", get(uptime::uptime))
        .fallback(not_found)
        .with_state(state)
        // Request log middleware - creates root span with request_id, method,
        // path, and client address for correlation
        .layer(middleware::from_fn(request_log_layer))
}
