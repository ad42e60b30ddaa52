//! Health check endpoints

use axum::{Router, routing::get};

use crate::state::AppState;

/// Health check handler
async fn health() -> &'static str {
    "API is running"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}
