use crate::{config::AppConfig, errors::ApiError};
use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

// Hashes a password using bcrypt. The random salt makes repeated calls
// produce different hashes for the same input.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

// Verifies a password against a bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    iat: i64,
    exp: i64,
}

/// Mints a signed bearer token bound to an admin id, expiring after the
/// configured TTL.
pub fn issue_token(admin_id: i64, config: &AppConfig) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id,
        iat: now.timestamp(),
        exp: (now + Duration::hours(config.token_ttl_hours)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.token_secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalError(format!("Token signing error: {}", e)))
}

/// Returns the admin id carried by a valid token, or `None` for anything
/// malformed, tampered with, or expired. Callers treat `None` as
/// "unauthenticated", never as an error to propagate.
pub fn verify_token(token: &str, config: &AppConfig) -> Option<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ttl_hours: i64) -> AppConfig {
        AppConfig {
            database_path: ":memory:".into(),
            token_secret: "test-secret-key-0123456789".to_string(),
            token_ttl_hours: ttl_hours,
        }
    }

    #[test]
    fn password_round_trip() {
        let hashed = hash_password("s3cret!").unwrap();
        assert!(verify_password("s3cret!", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn identical_passwords_hash_differently() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_round_trip_recovers_admin_id() {
        let config = config(24);
        let token = issue_token(17, &config).unwrap();
        assert_eq!(verify_token(&token, &config), Some(17));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config(-1);
        let token = issue_token(17, &config).unwrap();
        assert_eq!(verify_token(&token, &config), None);
    }

    #[test]
    fn tampered_or_garbage_tokens_are_rejected() {
        let config = config(24);
        let token = issue_token(17, &config).unwrap();

        let mut tampered = token.clone();
        tampered.push('A');
        assert_eq!(verify_token(&tampered, &config), None);
        assert_eq!(verify_token("not-a-token", &config), None);
        assert_eq!(verify_token("", &config), None);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let config = config(24);
        let other = AppConfig {
            token_secret: "a-different-secret-entirely".to_string(),
            ..config.clone()
        };
        let token = issue_token(17, &other).unwrap();
        assert_eq!(verify_token(&token, &config), None);
    }
}
