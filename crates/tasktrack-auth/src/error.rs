//! Authentication error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authorization header required")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthHeader,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token signing error: {0}")]
    TokenIssue(jsonwebtoken::errors::Error),
}

impl AuthError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MalformedToken => StatusCode::BAD_REQUEST,
            AuthError::PasswordHash(_) | AuthError::TokenIssue(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message shown to the client
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password",
            AuthError::MissingAuthHeader => "Authorization header required",
            AuthError::InvalidAuthHeader => "Invalid token format",
            AuthError::MalformedToken => "Invalid token",
            AuthError::InvalidSignature => "Invalid token signature",
            AuthError::TokenExpired => "Token expired",
            AuthError::PasswordHash(_) => "Could not process request",
            AuthError::TokenIssue(_) => "Could not create token",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Authentication failure: {}", self);
        }

        let body = axum::Json(json!({
            "error": self.client_message()
        }));

        (status, body).into_response()
    }
}
