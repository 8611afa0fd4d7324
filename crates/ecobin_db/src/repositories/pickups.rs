//! Repository for pickup dispatch records
//!
//! At most one REQUESTED pickup may exist per bin. The read check in the
//! handler is advisory; a partial unique index closes the race between
//! concurrent requests for the same bin.

use crate::error::DbError;
use ecobin_common::models::Pickup;

/// Storage operations for pickups.
pub trait PickupRepository {
    /// Create the pickups table and the active-pickup uniqueness index if
    /// missing.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// The REQUESTED pickup for a bin, if one exists.
    fn find_active_by_bin(
        &self,
        bin_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Pickup>, DbError>> + Send;

    /// Create a pickup record.
    ///
    /// Returns [`DbError::UniqueViolation`] when the bin already has an
    /// active pickup.
    fn create(
        &self,
        pickup: Pickup,
    ) -> impl std::future::Future<Output = Result<Pickup, DbError>> + Send;
}
