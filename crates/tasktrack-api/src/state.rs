//! Application state

use axum::extract::FromRef;
use std::sync::Arc;
use tasktrack_auth::TokenManager;
use tasktrack_db::Database;

/// Application state shared across handlers
///
/// Built once at startup and only read afterwards.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<TokenManager>,
}

impl AppState {
    pub fn new(db: Database, tokens: Arc<TokenManager>) -> Self {
        Self { db, tokens }
    }
}
