//! Repositories for the EcoBin entities
//!
//! Each entity gets a trait describing its storage operations and a SQL
//! implementation over the shared [`DbClient`](crate::DbClient). The
//! two-entity ledger operations (deposit + balance, debit + stock) live in
//! the waste and reward repositories and are transactional.

pub mod bins;
pub mod bins_sql;
pub mod pickups;
pub mod pickups_sql;
pub mod rewards;
pub mod rewards_sql;
pub mod users;
pub mod users_sql;
pub mod waste;
pub mod waste_sql;

pub use bins::BinRepository;
pub use bins_sql::SqlBinRepository;
pub use pickups::PickupRepository;
pub use pickups_sql::SqlPickupRepository;
pub use rewards::{RedeemOutcome, RewardRepository};
pub use rewards_sql::SqlRewardRepository;
pub use users::UserRepository;
pub use users_sql::SqlUserRepository;
pub use waste::{CategoryBreakdown, WasteLedgerRepository};
pub use waste_sql::SqlWasteLedgerRepository;

use crate::error::DbError;
use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 with a fixed UTC offset, so stored timestamps sort
/// lexicographically the same way they sort chronologically.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::QueryError(format!("invalid stored timestamp '{value}': {e}")))
}
