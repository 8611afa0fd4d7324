//! Repository for smart bin hardware records

use crate::error::DbError;
use chrono::{DateTime, Utc};
use ecobin_common::models::{Bin, BinStatus, FillLevels};

/// Storage operations for bins.
pub trait BinRepository {
    /// Create the bins table and its uniqueness indexes if missing.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Register a bin at provisioning time.
    ///
    /// Returns [`DbError::UniqueViolation`] when the owner already has a bin
    /// or the model number is taken.
    fn create(&self, bin: Bin)
        -> impl std::future::Future<Output = Result<Bin, DbError>> + Send;

    /// The single bin owned by a user, if any.
    fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Bin>, DbError>> + Send;

    /// Apply a telemetry push from the hardware, keyed by model number.
    ///
    /// Returns `None` when the model number is unregistered.
    fn record_telemetry(
        &self,
        model_number: &str,
        fill_levels: FillLevels,
        status: BinStatus,
        last_ping: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Bin>, DbError>> + Send;

    /// Bins that qualify for pickup dispatch: status ONLINE or FULL and at
    /// least one fill level at or above `fill_threshold`.
    ///
    /// Distance filtering happens in the dispatch service; this only narrows
    /// the candidate set.
    fn find_pickup_candidates(
        &self,
        fill_threshold: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Bin>, DbError>> + Send;

    /// Find a bin by its ID.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Bin>, DbError>> + Send;
}
