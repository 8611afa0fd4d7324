//! Database integration for EcoBin
//!
//! This crate provides a database client that is designed to be database
//! agnostic, using SQLx as the underlying database library. It supports
//! SQLite (the default), PostgreSQL, and MySQL through feature flags, and
//! holds the repository for every EcoBin entity.
//!
//! The two multi-entity ledger operations, deposit logging (entry append +
//! balance increment) and reward redemption (balance debit + stock
//! decrement), run as transactions with conditional updates.

pub mod client;
pub mod error;
pub mod repositories;

// Re-export the client and repository traits for ease of use
pub use client::{DbClient, DbTransaction};
pub use error::DbError;

pub use repositories::{
    BinRepository, CategoryBreakdown, PickupRepository, RedeemOutcome, RewardRepository,
    SqlBinRepository, SqlPickupRepository, SqlRewardRepository, SqlUserRepository,
    SqlWasteLedgerRepository, UserRepository, WasteLedgerRepository,
};
