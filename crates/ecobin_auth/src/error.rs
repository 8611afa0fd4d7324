//! Error types for the access-control gate

use ecobin_common::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to create token: {0}")]
    TokenCreation(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => {
                ApiError::Authentication("Invalid access token".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
