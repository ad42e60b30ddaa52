//! tasktrack REST API
//!
//! This crate provides the Axum-based HTTP API: registration, login,
//! and the per-user task endpoints.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, AppJson};
pub use routes::create_router;
pub use state::AppState;
