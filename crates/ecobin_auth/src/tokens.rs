//! Bearer-token minting and verification.
//!
//! Two HS256 tokens per session: a short-lived access token carrying
//! identity and role, and a longer-lived refresh token carrying only the
//! subject. Secrets and lifetimes come from [`AuthConfig`].

use crate::error::AuthError;
use chrono::Utc;
use ecobin_common::models::User;
use ecobin_config::AuthConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by the access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID.
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
}

/// Claims carried by the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID.
    pub sub: String,
    pub exp: i64,
}

pub fn create_access_token(user: &User, config: &AuthConfig) -> Result<String, AuthError> {
    let claims = AccessClaims {
        sub: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        exp: Utc::now().timestamp() + config.access_token_ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.access_token_secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

pub fn create_refresh_token(user: &User, config: &AuthConfig) -> Result<String, AuthError> {
    let claims = RefreshClaims {
        sub: user.id.clone(),
        exp: Utc::now().timestamp() + config.refresh_token_ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

pub fn verify_access_token(token: &str, config: &AuthConfig) -> Result<AccessClaims, AuthError> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_token_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            access_token_ttl_secs: 3600,
            refresh_token_ttl_secs: 86_400,
            secure_cookies: false,
        }
    }

    fn test_user() -> User {
        User::new(
            "pia".into(),
            "pia@example.com".into(),
            "Pia P".into(),
            "https://cdn.example.com/pia.png".into(),
            "$2b$10$hash".into(),
        )
    }

    #[test]
    fn access_token_round_trips() {
        let config = test_config();
        let user = test_user();

        let token = create_access_token(&user, &config).unwrap();
        let claims = verify_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "pia");
        assert_eq!(claims.role, "USER");
    }

    #[test]
    fn access_token_rejects_wrong_secret() {
        let config = test_config();
        let token = create_access_token(&test_user(), &config).unwrap();

        let mut other = test_config();
        other.access_token_secret = "different".to_string();
        assert!(matches!(
            verify_access_token(&token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let mut config = test_config();
        config.access_token_ttl_secs = -120; // already expired
        let token = create_access_token(&test_user(), &config).unwrap();
        config.access_token_ttl_secs = 3600;

        assert!(matches!(
            verify_access_token(&token, &config),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn refresh_token_is_not_a_valid_access_token() {
        let config = test_config();
        let refresh = create_refresh_token(&test_user(), &config).unwrap();
        assert!(verify_access_token(&refresh, &config).is_err());
    }
}
