//! tasktrack database layer
//!
//! This crate owns persistence for users and their tasks, using SQLite
//! via sqlx. Task queries are always filtered by owner.

pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::Database;
