//! Authentication middleware for Axum

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::jwt::TokenManager;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated user information
///
/// Handlers take this as an argument; it is only constructed from a token
/// that verified successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
}

/// Extract bearer token from authorization header
fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    match header.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::InvalidAuthHeader),
    }
}

/// Authenticate a request from its headers
pub fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenManager,
    now: DateTime<Utc>,
) -> Result<AuthUser, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(header)?;
    let id = tokens.verify(token, now)?;

    debug!("Authenticated user: {}", id);
    Ok(AuthUser { id })
}

/// Authentication middleware
///
/// Rejects the request before it reaches a handler unless it carries a
/// valid bearer token. On success the `AuthUser` is added to the request
/// extensions, where the `AuthUser` extractor picks it up.
pub async fn require_auth(
    State(tokens): State<Arc<TokenManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(request.headers(), &tokens, Utc::now())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }

        let tokens = Arc::<TokenManager>::from_ref(state);
        authenticate(&parts.headers, &tokens, Utc::now())
    }
}
