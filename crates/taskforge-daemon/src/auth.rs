//! Session tokens and password hashing
//!
//! Sessions are HS256-signed claims carrying the account id, email, and
//! stored class. The effective role is NOT in the token: it is re-derived
//! from live team membership on every authenticated request, so a
//! membership edit takes effect on the next call without re-login.

use crate::api::rest::state::AppState;
use crate::error::ApiError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use taskforge_types::{Account, AccountClass, AccountId};

/// Signed session claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    /// Account email
    pub email: String,
    /// Stored account class
    pub class: AccountClass,
    /// Expiry (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Hash a password with Argon2 and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Issue a session token for an authenticated account.
pub fn issue_token(secret: &str, account: &Account, ttl_hours: i64) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: account.id.as_str().to_string(),
        email: account.email.clone(),
        class: account.class,
        exp: (now + Duration::hours(ttl_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Decode and validate a session token.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthenticated("invalid or expired session token".to_string()))
}

/// Authenticated session, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: AccountId,
    pub email: String,
    pub class: AccountClass,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthenticated("missing Authorization header".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthenticated("Authorization header is not a Bearer token".to_string())
        })?;

        let claims = decode_token(&state.auth.jwt_secret, token)?;

        Ok(Session {
            account_id: AccountId::new(claims.sub),
            email: claims.email,
            class: claims.class,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account() -> Account {
        Account {
            id: AccountId::new("User-00001"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            contact: None,
            avatar: None,
            class: AccountClass::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("s3cret!").unwrap();
        assert!(verify_password("s3cret!", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret!", "not-a-hash"));
    }

    #[test]
    fn test_token_round_trip() {
        let token = issue_token("secret", &account(), 1).unwrap();
        let claims = decode_token("secret", &token).unwrap();
        assert_eq!(claims.sub, "User-00001");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.class, AccountClass::User);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = issue_token("secret", &account(), 1).unwrap();
        assert!(matches!(
            decode_token("other", &token),
            Err(ApiError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue_token("secret", &account(), -2).unwrap();
        assert!(decode_token("secret", &token).is_err());
    }
}
