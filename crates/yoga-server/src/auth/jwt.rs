//! Bearer tokens issued at login.
//!
//! Tokens are HS256 JWTs whose subject is the account email. Expiry is checked
//! with no leeway.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_ms: u64,
}

impl JwtService {
    pub fn new(secret: &str, expiration_ms: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiration_ms,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration_ms)
    }

    pub fn generate_token(&self, email: &str) -> AppResult<String> {
        let now = Utc::now().timestamp_millis();
        let lifetime = i64::try_from(self.expiration_ms).unwrap_or(i64::MAX / 2);
        self.encode(&Claims {
            sub: email.to_string(),
            iat: now / 1000,
            exp: now.saturating_add(lifetime) / 1000,
        })
    }

    /// Returns the subject of a valid, unexpired token.
    pub fn validate_token(&self, token: &str) -> AppResult<String> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {e}");
                AppError::Unauthorized
            })
    }

    fn encode(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "testSecretKey123456789012345678901234567890";

    #[test]
    fn token_round_trips_subject() {
        let jwt = JwtService::new(SECRET, 60_000);
        let token = jwt.generate_token("testuser@example.com").unwrap();
        assert!(!token.is_empty());
        assert_eq!(jwt.validate_token(&token).unwrap(), "testuser@example.com");
    }

    #[test]
    fn garbage_is_rejected() {
        let jwt = JwtService::new(SECRET, 60_000);
        assert!(matches!(
            jwt.validate_token("invalidToken"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtService::new(SECRET, 60_000);
        let now = Utc::now().timestamp();
        let token = jwt
            .encode(&Claims {
                sub: "testuser@example.com".into(),
                iat: now - 120,
                exp: now - 60,
            })
            .unwrap();
        assert!(matches!(jwt.validate_token(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn other_secret_is_rejected() {
        let issuer = JwtService::new(SECRET, 60_000);
        let verifier = JwtService::new("another-secret-another-secret-another", 60_000);
        let token = issuer.generate_token("testuser@example.com").unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }
}
