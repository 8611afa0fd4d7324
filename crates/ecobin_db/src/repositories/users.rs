//! Repository for user accounts
//!
//! The user row is the identity store and the balance holder: every ledger
//! operation ends up incrementing or debiting `eco_coins` here.

use crate::error::DbError;
use ecobin_common::models::User;

/// Storage operations for user accounts.
pub trait UserRepository {
    /// Create the users table and its uniqueness indexes if missing.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a new user.
    ///
    /// Returns [`DbError::UniqueViolation`] when the username or email is
    /// already taken.
    fn create(
        &self,
        user: User,
    ) -> impl std::future::Future<Output = Result<User, DbError>> + Send;

    /// Find a user by ID.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    /// Find a user by username (stored lowercased).
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    /// Find a user by email (stored lowercased).
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    /// Store or clear the long-lived refresh token.
    ///
    /// Returns `false` when the user does not exist.
    fn set_refresh_token(
        &self,
        user_id: &str,
        refresh_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
