//! The domain error taxonomy shared by every EcoBin handler.
//!
//! All handler errors funnel through [`ApiError`], which translates into the
//! common response envelope. Unexpected errors collapse to a generic 500 so
//! no internals leak into production responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid or expired credentials.
    #[error("{0}")]
    Authentication(String),

    /// Authenticated, but the role is not permitted here.
    #[error("{0}")]
    Authorization(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate active state, e.g. a bin already scheduled for pickup.
    #[error("{0}")]
    Conflict(String),

    /// A multi-step mutation failed partway and was rolled back.
    #[error("{0}")]
    Transaction(String),

    /// Anything unexpected. The detail is logged, never returned.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Authorization(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Transaction(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "statusCode": status.as_u16(),
            "message": self.public_message(),
            "success": false,
        });
        (status, Json(body)).into_response()
    }
}

pub fn validation_error<T: std::fmt::Display>(message: T) -> ApiError {
    ApiError::Validation(message.to_string())
}

pub fn not_found<T: std::fmt::Display>(message: T) -> ApiError {
    ApiError::NotFound(message.to_string())
}

pub fn conflict<T: std::fmt::Display>(message: T) -> ApiError {
    ApiError::Conflict(message.to_string())
}

pub fn internal_error<T: std::fmt::Display>(message: T) -> ApiError {
    ApiError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_http_statuses() {
        assert_eq!(
            validation_error("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Authentication("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Authorization("wrong role".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(not_found("gone").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(conflict("dup").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Transaction("partial".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = internal_error("connection pool exhausted at 10.0.0.3");
        assert_eq!(err.public_message(), "Internal server error");
    }
}
