//! SQL implementation of the waste ledger repository
//!
//! The deposit path runs inside a single transaction: the entry insert and
//! the balance increment either both commit or both roll back, so a reader
//! can never observe an entry without its matching coins.

use crate::error::DbError;
use crate::repositories::waste::{CategoryBreakdown, WasteLedgerRepository};
use crate::repositories::{format_timestamp, parse_timestamp};
use crate::DbClient;
use ecobin_common::models::{WasteCategory, WasteEntry};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, warn};

/// SQL implementation of the waste ledger repository
#[derive(Debug, Clone)]
pub struct SqlWasteLedgerRepository {
    db_client: DbClient,
}

impl SqlWasteLedgerRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn map_entry(row: &AnyRow) -> Result<WasteEntry, DbError> {
    let category_text: String = row
        .try_get("category")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let category = WasteCategory::parse(&category_text)
        .ok_or_else(|| DbError::QueryError(format!("unknown waste category '{category_text}'")))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    Ok(WasteEntry {
        id: row.try_get("id").map_err(|e| DbError::QueryError(e.to_string()))?,
        user_id: row
            .try_get("user_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        category,
        weight: row
            .try_get("weight")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        created_at: parse_timestamp(&created_at)?,
    })
}

impl WasteLedgerRepository for SqlWasteLedgerRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing waste ledger schema");

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS waste_entries (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    category TEXT NOT NULL,
                    weight DOUBLE PRECISION NOT NULL,
                    created_at TEXT NOT NULL
                )
                "#,
            )
            .await?;

        self.db_client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_waste_entries_user_created \
                 ON waste_entries (user_id, created_at)",
            )
            .await?;

        Ok(())
    }

    async fn log_deposit(
        &self,
        entry: WasteEntry,
        coins: i64,
    ) -> Result<Option<(WasteEntry, i64)>, DbError> {
        debug!(
            "Logging {} g of {} for user {} (+{} coins)",
            entry.weight,
            entry.category.as_str(),
            entry.user_id,
            coins
        );

        let mut tx = self.db_client.begin().await?;

        sqlx::query(
            "INSERT INTO waste_entries (id, user_id, category, weight, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(entry.category.as_str())
        .bind(entry.weight)
        .bind(format_timestamp(&entry.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::TransactionError(e.to_string()))?;

        let updated = sqlx::query(
            "UPDATE users SET eco_coins = eco_coins + $1, updated_at = $2 WHERE id = $3",
        )
        .bind(coins)
        .bind(format_timestamp(&chrono::Utc::now()))
        .bind(&entry.user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::TransactionError(e.to_string()))?;

        if updated.rows_affected() == 0 {
            warn!("User {} vanished mid-deposit; rolling back", entry.user_id);
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            return Ok(None);
        }

        let balance_row = sqlx::query("SELECT eco_coins FROM users WHERE id = $1")
            .bind(&entry.user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        let new_balance: i64 = balance_row
            .try_get("eco_coins")
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        Ok(Some((entry, new_balance)))
    }

    async fn analytics_by_category(
        &self,
        user_id: &str,
    ) -> Result<Vec<CategoryBreakdown>, DbError> {
        let rows = sqlx::query(
            "SELECT category, SUM(weight) AS total_weight, COUNT(*) AS entry_count \
             FROM waste_entries WHERE user_id = $1 GROUP BY category",
        )
        .bind(user_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let category_text: String = row
                    .try_get("category")
                    .map_err(|e| DbError::QueryError(e.to_string()))?;
                let category = WasteCategory::parse(&category_text).ok_or_else(|| {
                    DbError::QueryError(format!("unknown waste category '{category_text}'"))
                })?;
                Ok(CategoryBreakdown {
                    category,
                    total_weight: row
                        .try_get("total_weight")
                        .map_err(|e| DbError::QueryError(e.to_string()))?,
                    count: row
                        .try_get("entry_count")
                        .map_err(|e| DbError::QueryError(e.to_string()))?,
                })
            })
            .collect()
    }

    async fn history_page(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WasteEntry>, DbError> {
        let rows = sqlx::query(
            "SELECT id, user_id, category, weight, created_at \
             FROM waste_entries WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(map_entry).collect()
    }

    async fn count_entries(&self, user_id: &str) -> Result<i64, DbError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS entry_count FROM waste_entries WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.try_get("entry_count")
            .map_err(|e| DbError::QueryError(e.to_string()))
    }
}
