//! SQL implementation of the pickup repository

use crate::error::DbError;
use crate::repositories::pickups::PickupRepository;
use crate::repositories::{format_timestamp, parse_timestamp};
use crate::DbClient;
use ecobin_common::models::{Pickup, PickupStatus};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

/// SQL implementation of the pickup repository
#[derive(Debug, Clone)]
pub struct SqlPickupRepository {
    db_client: DbClient,
}

impl SqlPickupRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

const PICKUP_COLUMNS: &str = "id, bin_id, picker_id, status, requested_at, completed_at";

fn map_pickup(row: &AnyRow) -> Result<Pickup, DbError> {
    let status_text: String = row
        .try_get("status")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let status = PickupStatus::parse(&status_text)
        .ok_or_else(|| DbError::QueryError(format!("unknown pickup status '{status_text}'")))?;
    let requested_at: String = row
        .try_get("requested_at")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let completed_at: Option<String> = row
        .try_get("completed_at")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    Ok(Pickup {
        id: row.try_get("id").map_err(|e| DbError::QueryError(e.to_string()))?,
        bin_id: row
            .try_get("bin_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        picker_id: row
            .try_get("picker_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        status,
        requested_at: parse_timestamp(&requested_at)?,
        completed_at: completed_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

impl PickupRepository for SqlPickupRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing pickups schema");

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS pickups (
                    id TEXT PRIMARY KEY,
                    bin_id TEXT NOT NULL,
                    picker_id TEXT NOT NULL,
                    status TEXT NOT NULL DEFAULT 'REQUESTED',
                    requested_at TEXT NOT NULL,
                    completed_at TEXT
                )
                "#,
            )
            .await?;

        // One active pickup per bin, enforced where it matters: in the
        // store, not in the read-then-write handler path.
        self.db_client
            .execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_pickups_active_bin \
                 ON pickups (bin_id) WHERE status = 'REQUESTED'",
            )
            .await?;

        Ok(())
    }

    async fn find_active_by_bin(&self, bin_id: &str) -> Result<Option<Pickup>, DbError> {
        let query = format!(
            "SELECT {PICKUP_COLUMNS} FROM pickups WHERE bin_id = $1 AND status = 'REQUESTED'"
        );
        let row = sqlx::query(&query)
            .bind(bin_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(map_pickup).transpose()
    }

    async fn create(&self, pickup: Pickup) -> Result<Pickup, DbError> {
        debug!(
            "Creating pickup for bin {} by picker {}",
            pickup.bin_id, pickup.picker_id
        );

        let query = format!(
            "INSERT INTO pickups ({PICKUP_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        );

        sqlx::query(&query)
            .bind(&pickup.id)
            .bind(&pickup.bin_id)
            .bind(&pickup.picker_id)
            .bind(pickup.status.as_str())
            .bind(format_timestamp(&pickup.requested_at))
            .bind(pickup.completed_at.as_ref().map(format_timestamp))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                DbError::from_write_error(e, "This bin is already scheduled for pickup")
            })?;

        Ok(pickup)
    }
}
