//! Error types for the database client

use ecobin_common::ApiError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    UniqueViolation(String),
}

impl DbError {
    /// Wrap an insert/update failure, recognizing uniqueness violations so
    /// they can surface as 409s instead of opaque 500s.
    pub fn from_write_error(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let unique = matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
                || db_err.message().to_uppercase().contains("UNIQUE");
            if unique {
                return DbError::UniqueViolation(conflict_message.to_string());
            }
        }
        DbError::SqlxError(err)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(message) => ApiError::Conflict(message),
            DbError::TransactionError(message) => ApiError::Transaction(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
