//! SQL implementation of the bin repository

use crate::error::DbError;
use crate::repositories::bins::BinRepository;
use crate::repositories::{format_timestamp, parse_timestamp};
use crate::DbClient;
use chrono::{DateTime, Utc};
use ecobin_common::models::{Bin, BinStatus, FillLevels};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

/// SQL implementation of the bin repository
#[derive(Debug, Clone)]
pub struct SqlBinRepository {
    db_client: DbClient,
}

impl SqlBinRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

const BIN_COLUMNS: &str =
    "id, owner_id, model_number, status, longitude, latitude, \
     fill_recyclable, fill_organic, fill_hazardous, last_ping";

fn map_bin(row: &AnyRow) -> Result<Bin, DbError> {
    let status_text: String = row
        .try_get("status")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let status = BinStatus::parse(&status_text)
        .ok_or_else(|| DbError::QueryError(format!("unknown bin status '{status_text}'")))?;
    let last_ping: String = row
        .try_get("last_ping")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    Ok(Bin {
        id: row.try_get("id").map_err(|e| DbError::QueryError(e.to_string()))?,
        owner_id: row
            .try_get("owner_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        model_number: row
            .try_get("model_number")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        status,
        longitude: row
            .try_get("longitude")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        latitude: row
            .try_get("latitude")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        fill_levels: FillLevels {
            recyclable: row
                .try_get("fill_recyclable")
                .map_err(|e| DbError::QueryError(e.to_string()))?,
            organic: row
                .try_get("fill_organic")
                .map_err(|e| DbError::QueryError(e.to_string()))?,
            hazardous: row
                .try_get("fill_hazardous")
                .map_err(|e| DbError::QueryError(e.to_string()))?,
        },
        last_ping: parse_timestamp(&last_ping)?,
    })
}

impl BinRepository for SqlBinRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing bins schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS bins (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL UNIQUE,
                model_number TEXT NOT NULL UNIQUE,
                status TEXT NOT NULL DEFAULT 'ONLINE',
                longitude DOUBLE PRECISION NOT NULL,
                latitude DOUBLE PRECISION NOT NULL,
                fill_recyclable BIGINT NOT NULL DEFAULT 0,
                fill_organic BIGINT NOT NULL DEFAULT 0,
                fill_hazardous BIGINT NOT NULL DEFAULT 0,
                last_ping TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, bin: Bin) -> Result<Bin, DbError> {
        debug!("Registering bin {} for owner {}", bin.model_number, bin.owner_id);

        let query = format!(
            "INSERT INTO bins ({BIN_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
        );

        sqlx::query(&query)
            .bind(&bin.id)
            .bind(&bin.owner_id)
            .bind(&bin.model_number)
            .bind(bin.status.as_str())
            .bind(bin.longitude)
            .bind(bin.latitude)
            .bind(bin.fill_levels.recyclable)
            .bind(bin.fill_levels.organic)
            .bind(bin.fill_levels.hazardous)
            .bind(format_timestamp(&bin.last_ping))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                DbError::from_write_error(e, "A bin is already registered for this owner")
            })?;

        Ok(bin)
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<Bin>, DbError> {
        let query = format!("SELECT {BIN_COLUMNS} FROM bins WHERE owner_id = $1");
        let row = sqlx::query(&query)
            .bind(owner_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(map_bin).transpose()
    }

    async fn record_telemetry(
        &self,
        model_number: &str,
        fill_levels: FillLevels,
        status: BinStatus,
        last_ping: DateTime<Utc>,
    ) -> Result<Option<Bin>, DbError> {
        debug!("Telemetry push from bin {}", model_number);

        let query = r#"
            UPDATE bins
            SET fill_recyclable = $1, fill_organic = $2, fill_hazardous = $3,
                status = $4, last_ping = $5
            WHERE model_number = $6
        "#;

        let result = sqlx::query(query)
            .bind(fill_levels.recyclable)
            .bind(fill_levels.organic)
            .bind(fill_levels.hazardous)
            .bind(status.as_str())
            .bind(format_timestamp(&last_ping))
            .bind(model_number)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let select = format!("SELECT {BIN_COLUMNS} FROM bins WHERE model_number = $1");
        let row = sqlx::query(&select)
            .bind(model_number)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        map_bin(&row).map(Some)
    }

    async fn find_pickup_candidates(&self, fill_threshold: i64) -> Result<Vec<Bin>, DbError> {
        let query = format!(
            "SELECT {BIN_COLUMNS} FROM bins \
             WHERE status IN ('ONLINE', 'FULL') \
               AND (fill_recyclable >= $1 OR fill_organic >= $1 OR fill_hazardous >= $1)"
        );

        let rows = sqlx::query(&query)
            .bind(fill_threshold)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(map_bin).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Bin>, DbError> {
        let query = format!("SELECT {BIN_COLUMNS} FROM bins WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(map_bin).transpose()
    }
}
