//! JWT token management

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Default lifetime of an issued token
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Issues and verifies HS256 session tokens
///
/// Tokens are stateless: validity depends only on the signature and the
/// embedded expiry, so there is no way to revoke one before it expires.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: Duration,
}

impl TokenManager {
    /// Create a new token manager
    pub fn new(secret: &str, token_expiry_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify`
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_expiry: Duration::hours(token_expiry_hours),
        }
    }

    /// Lifetime of issued tokens, in seconds
    pub fn expires_in(&self) -> i64 {
        self.token_expiry.num_seconds()
    }

    /// Issue a token for `user_id`, valid from `now` for the configured window
    pub fn issue(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, AuthError> {
        let exp = now + self.token_expiry;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        debug!("Issuing token for user {}", user_id);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::TokenIssue)
    }

    /// Verify a token at `now` and return the user id it was issued for
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<i64, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    _ => {
                        debug!("Rejected token: {}", e);
                        AuthError::MalformedToken
                    }
                }
            })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        claims.sub.parse().map_err(|_| AuthError::MalformedToken)
    }

    /// Issue a token valid from the current time
    pub fn generate_token(&self, user_id: i64) -> Result<String, AuthError> {
        self.issue(user_id, Utc::now())
    }

    /// Verify a token against the current time
    pub fn validate_token(&self, token: &str) -> Result<i64, AuthError> {
        self.verify(token, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_token_generation_and_validation() {
        let manager = TokenManager::new("test-secret-key", 24);

        let token = manager.generate_token(42).unwrap();
        assert_eq!(manager.validate_token(&token).unwrap(), 42);
    }

    #[test]
    fn test_expiry_boundary() {
        let manager = TokenManager::new("test-secret-key", 24);
        let token = manager.issue(1, t0()).unwrap();
        let expires_at = t0() + Duration::hours(24);

        assert_eq!(manager.verify(&token, t0()).unwrap(), 1);
        assert_eq!(
            manager.verify(&token, expires_at - Duration::seconds(1)).unwrap(),
            1
        );
        assert!(matches!(
            manager.verify(&token, expires_at),
            Err(AuthError::TokenExpired)
        ));
        assert!(matches!(
            manager.verify(&token, expires_at + Duration::days(3)),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let issuer = TokenManager::new("secret-one", 24);
        let verifier = TokenManager::new("secret-two", 24);

        let token = issuer.issue(5, t0()).unwrap();
        assert!(matches!(
            verifier.verify(&token, t0()),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_is_invalid_signature() {
        let manager = TokenManager::new("test-secret-key", 24);
        let token = manager.issue(5, t0()).unwrap();
        let other = manager.issue(6, t0()).unwrap();

        // Splice user 6's payload onto user 5's signature
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(
            manager.verify(&forged, t0()),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        let manager = TokenManager::new("test-secret-key", 24);

        for token in ["", "invalid-token", "a.b", "a.b.c", "not.base64!.sig"] {
            assert!(
                matches!(manager.verify(token, t0()), Err(AuthError::MalformedToken)),
                "token {:?} should be malformed",
                token
            );
        }
    }

    #[test]
    fn test_non_numeric_subject_is_malformed() {
        let secret = "test-secret-key";
        let manager = TokenManager::new(secret, 24);
        let claims = Claims {
            sub: "alice".to_string(),
            exp: (t0() + Duration::hours(1)).timestamp(),
            iat: t0().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            manager.verify(&token, t0()),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn test_expires_in() {
        assert_eq!(TokenManager::new("k", 24).expires_in(), 86_400);
        assert_eq!(TokenManager::new("k", 1).expires_in(), 3_600);
    }
}
