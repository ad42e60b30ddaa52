//! API routes

mod auth;
mod health;
mod tasks;
pub mod types;

use axum::{Router, middleware};
use tasktrack_auth::require_auth;

use crate::state::AppState;

/// Create the main router
///
/// `/tasks` routes sit behind the `require_auth` layer; health and auth
/// routes are public.
pub fn create_router(state: AppState) -> Router {
    let protected = tasks::routes().route_layer(middleware::from_fn_with_state(
        state.tokens.clone(),
        require_auth,
    ));

    Router::new()
        // Health check
        .merge(health::routes())
        // Registration and login
        .merge(auth::routes())
        // Owner-scoped task API
        .merge(protected)
        .with_state(state)
}
