//! Credential handling: bcrypt password hashes and HS256 session tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::Config, error::AppError};

/// Issues and verifies session tokens, hashes and checks passwords.
///
/// Hashing runs on the blocking thread pool; bcrypt at cost 12 takes long
/// enough to stall a runtime worker.
#[derive(Clone)]
pub struct AuthService {
    secret: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

impl AuthService {
    pub fn new(secret: impl Into<String>, token_ttl_minutes: i64, bcrypt_cost: u32) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: Duration::minutes(token_ttl_minutes),
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.jwt_expiration_minutes,
            config.bcrypt_cost,
        )
    }

    /// Hash a password with a fresh salt.
    pub async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    /// Check a password against a stored hash.
    pub async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let matches =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }

    /// Issue a token for `user_id`, valid from now for the configured lifetime.
    pub fn issue_token(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue_token_at(user_id, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn issue_token_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.token_ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("token creation failed: {e}")))
    }

    /// Verify signature and expiry and return the user id in `sub`.
    ///
    /// Every failure collapses to `AppError::InvalidToken`.
    pub fn verify_token(&self, token: &str) -> Result<Uuid, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; no clock-skew allowance.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AppError::InvalidToken
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        // Minimum bcrypt cost keeps the tests fast.
        AuthService::new("test-secret", 60, 4)
    }

    #[tokio::test]
    async fn password_round_trip() {
        let auth = service();
        let hash = auth.hash_password("abcdef1234".to_string()).await.unwrap();

        assert!(hash.starts_with("$2"));
        assert!(
            auth.verify_password("abcdef1234".to_string(), hash.clone())
                .await
                .unwrap()
        );
        assert!(
            !auth
                .verify_password("wrong-password".to_string(), hash)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let auth = service();
        let first = auth.hash_password("abcdef1234".to_string()).await.unwrap();
        let second = auth.hash_password("abcdef1234".to_string()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let result = service()
            .verify_password("abcdef1234".to_string(), "not-a-hash".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn token_round_trip() {
        let auth = service();
        let user_id = Uuid::new_v4();
        let token = auth.issue_token(user_id).unwrap();
        assert_eq!(auth.verify_token(&token).unwrap(), user_id);
    }

    #[test]
    fn token_claims_span_sixty_minutes() {
        let auth = service();
        let issued_at = Utc::now();
        let token = auth.issue_token_at(Uuid::new_v4(), issued_at).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap()
        .claims;

        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn token_older_than_lifetime_is_rejected() {
        let auth = service();
        let issued_at = Utc::now() - Duration::minutes(61);
        let token = auth.issue_token_at(Uuid::new_v4(), issued_at).unwrap();
        assert!(matches!(
            auth.verify_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let other = AuthService::new("other-secret", 60, 4);
        let token = other.issue_token(Uuid::new_v4()).unwrap();
        assert!(matches!(
            service().verify_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let auth = service();
        assert!(auth.verify_token("").is_err());
        assert!(auth.verify_token("not.a.jwt").is_err());
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let claims = Claims {
            sub: "user-123".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            service().verify_token(&token),
            Err(AppError::InvalidToken)
        ));
    }
}
