//! Repository for the waste deposit ledger
//!
//! `log_deposit` is one of the two multi-entity ledger operations in the
//! system: the entry append and the balance increment must commit or roll
//! back together.

use crate::error::DbError;
use ecobin_common::models::{WasteCategory, WasteEntry};
use serde::Serialize;

/// Per-category aggregation over a user's ledger.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: WasteCategory,
    pub total_weight: f64,
    pub count: i64,
}

/// Storage operations for the waste ledger.
pub trait WasteLedgerRepository {
    /// Create the waste_entries table and its indexes if missing.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Append a deposit entry and increment the user's balance atomically.
    ///
    /// Returns the stored entry and the user's new balance, or `None` when
    /// the user no longer exists, in which case nothing is persisted.
    fn log_deposit(
        &self,
        entry: WasteEntry,
        coins: i64,
    ) -> impl std::future::Future<Output = Result<Option<(WasteEntry, i64)>, DbError>> + Send;

    /// Grouped totals per category for one user.
    fn analytics_by_category(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CategoryBreakdown>, DbError>> + Send;

    /// One page of a user's ledger, newest first.
    fn history_page(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> impl std::future::Future<Output = Result<Vec<WasteEntry>, DbError>> + Send;

    /// Total number of entries for one user.
    fn count_entries(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<i64, DbError>> + Send;
}
