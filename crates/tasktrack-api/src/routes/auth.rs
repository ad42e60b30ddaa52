//! Registration and login routes

use axum::{Router, extract::State, http::StatusCode, routing::post};
use tasktrack_auth::{AuthError, hash_password, verify_password};
use tasktrack_db::{DbError, NewUser};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AppJson};
use crate::state::AppState;

use super::types::{CredentialsRequest, LoginResponse, RegisterResponse};

// ==================== Input Validation ====================

/// Maximum allowed email length
const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum allowed password length (prevent DoS with very large passwords)
const MAX_PASSWORD_LENGTH: usize = 256;
/// Minimum allowed password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Valid Argon2 hash that no password is expected to match, verified when the
/// email is unknown so that both login failure paths cost the same
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dGltaW5nX2F0dGFja19wcmV2ZW50aW9u$K8rI5T7VdQ8xkO0GqK5K2w";

/// Validate email format and length
fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        return Err(ApiError::BadRequest("Email cannot be empty".to_string()));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Email exceeds maximum length of {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

/// Validate password length
fn validate_password(password: &str) -> Result<(), ApiError> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

// ==================== Auth Routes ====================

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<CredentialsRequest>,
) -> Result<(StatusCode, AppJson<RegisterResponse>), ApiError> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    debug!("Registering user: {}", request.email);

    let password_hash = hash_password(&request.password)?;

    let user = state
        .db
        .insert_user(NewUser {
            email: request.email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            DbError::Duplicate(_) => {
                ApiError::Conflict("Email address already in use".to_string())
            }
            other => ApiError::Database(other),
        })?;

    info!("Registered user {} ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        AppJson(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<CredentialsRequest>,
) -> Result<AppJson<LoginResponse>, ApiError> {
    // Oversized passwords are refused before any hashing work
    if request.password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::InvalidCredentials.into());
    }

    debug!("Login attempt for user: {}", request.email);

    let user = state.db.get_user_by_email(&request.email).await?;

    // Always run a verification, against a dummy hash for unknown emails
    let hash_to_verify = user.as_ref().map_or(DUMMY_HASH, |u| u.password_hash.as_str());
    let password_valid = verify_password(&request.password, hash_to_verify);

    // Unknown email and wrong password are reported identically
    let user = match (user, password_valid) {
        (Some(u), true) => u,
        _ => {
            warn!("Failed login attempt for {}", request.email);
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = state.tokens.generate_token(user.id)?;

    info!("User {} logged in", user.id);

    Ok(AppJson(LoginResponse {
        token,
        expires_in: state.tokens.expires_in(),
    }))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email(&format!("{}@x.io", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        // Eight two-byte characters meet the minimum
        assert!(validate_password(&"é".repeat(MIN_PASSWORD_LENGTH)).is_ok());
        assert!(validate_password(&"é".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        assert!(validate_password(&"é".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());

        let local = "ü".repeat(MAX_EMAIL_LENGTH - "@x.io".len());
        assert!(validate_email(&format!("{}@x.io", local)).is_ok());
        assert!(validate_email(&format!("{}ü@x.io", local)).is_err());
    }

    #[test]
    fn test_dummy_hash_never_matches() {
        assert!(!verify_password("", DUMMY_HASH));
        assert!(!verify_password("password", DUMMY_HASH));
    }
}
