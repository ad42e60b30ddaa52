//! tasktrack authentication
//!
//! Argon2 password hashing, HS256 session tokens, and the Axum
//! middleware/extractor that turns a bearer token into an `AuthUser`.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, DEFAULT_TOKEN_EXPIRY_HOURS, TokenManager};
pub use middleware::{AuthUser, authenticate, require_auth};
pub use password::{hash_password, verify_password};
