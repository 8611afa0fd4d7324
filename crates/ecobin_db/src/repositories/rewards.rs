//! Repository for the reward catalog and the redemption ledger
//!
//! `redeem` is the second multi-entity ledger operation: the balance debit
//! and the stock decrement are guarded conditional updates inside one
//! transaction, so two concurrent redemptions of the last unit (or of the
//! same balance) cannot both succeed.

use crate::error::DbError;
use ecobin_common::models::Reward;

/// Result of the transactional redemption.
#[derive(Debug, Clone, PartialEq)]
pub enum RedeemOutcome {
    /// Debit and decrement committed.
    Redeemed { new_balance: i64, title: String },
    /// Reward missing, inactive, or stock exhausted at commit time.
    Unavailable,
    /// The balance no longer covers the cost at commit time.
    InsufficientCoins,
}

/// Storage operations for rewards.
pub trait RewardRepository {
    /// Create the rewards table if missing.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a catalog item.
    fn create(
        &self,
        reward: Reward,
    ) -> impl std::future::Future<Output = Result<Reward, DbError>> + Send;

    /// All active rewards.
    fn list_active(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Reward>, DbError>> + Send;

    /// Find a reward by ID.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Reward>, DbError>> + Send;

    /// Exchange coins for one unit of a reward, atomically.
    ///
    /// The balance check and debit, and the stock check and decrement, are
    /// single conditional statements; a zero-row update aborts the whole
    /// transaction.
    fn redeem(
        &self,
        user_id: &str,
        reward_id: &str,
    ) -> impl std::future::Future<Output = Result<RedeemOutcome, DbError>> + Send;
}
