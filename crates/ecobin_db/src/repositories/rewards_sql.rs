//! SQL implementation of the reward repository

use crate::error::DbError;
use crate::repositories::rewards::{RedeemOutcome, RewardRepository};
use crate::DbClient;
use ecobin_common::models::{Reward, RewardCategory};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, info};

/// SQL implementation of the reward repository
#[derive(Debug, Clone)]
pub struct SqlRewardRepository {
    db_client: DbClient,
}

impl SqlRewardRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

const REWARD_COLUMNS: &str = "id, title, description, cost, category, stock, image_url, is_active";

fn map_reward(row: &AnyRow) -> Result<Reward, DbError> {
    let category_text: String = row
        .try_get("category")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let category = RewardCategory::parse(&category_text).ok_or_else(|| {
        DbError::QueryError(format!("unknown reward category '{category_text}'"))
    })?;
    let is_active: i64 = row
        .try_get("is_active")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    Ok(Reward {
        id: row.try_get("id").map_err(|e| DbError::QueryError(e.to_string()))?,
        title: row
            .try_get("title")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        description: row
            .try_get("description")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        cost: row
            .try_get("cost")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        category,
        stock: row
            .try_get("stock")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        image_url: row
            .try_get("image_url")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        is_active: is_active != 0,
    })
}

impl RewardRepository for SqlRewardRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing rewards schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS rewards (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                cost BIGINT NOT NULL,
                category TEXT NOT NULL,
                stock BIGINT NOT NULL DEFAULT -1,
                image_url TEXT NOT NULL,
                is_active BIGINT NOT NULL DEFAULT 1
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, reward: Reward) -> Result<Reward, DbError> {
        debug!("Creating reward '{}'", reward.title);

        let query = format!(
            "INSERT INTO rewards ({REWARD_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        );

        sqlx::query(&query)
            .bind(&reward.id)
            .bind(&reward.title)
            .bind(&reward.description)
            .bind(reward.cost)
            .bind(reward.category.as_str())
            .bind(reward.stock)
            .bind(&reward.image_url)
            .bind(if reward.is_active { 1i64 } else { 0i64 })
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(reward)
    }

    async fn list_active(&self) -> Result<Vec<Reward>, DbError> {
        let query = format!(
            "SELECT {REWARD_COLUMNS} FROM rewards WHERE is_active = 1 ORDER BY cost ASC"
        );
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(map_reward).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reward>, DbError> {
        let query = format!("SELECT {REWARD_COLUMNS} FROM rewards WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(map_reward).transpose()
    }

    async fn redeem(&self, user_id: &str, reward_id: &str) -> Result<RedeemOutcome, DbError> {
        let mut tx = self.db_client.begin().await?;

        // Re-read inside the transaction; pre-checks in the handler only
        // produce friendlier messages, this is what actually serializes.
        let reward_row = sqlx::query(
            "SELECT title, cost, stock, is_active FROM rewards WHERE id = $1",
        )
        .bind(reward_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DbError::TransactionError(e.to_string()))?;

        let Some(reward_row) = reward_row else {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            return Ok(RedeemOutcome::Unavailable);
        };

        let title: String = reward_row
            .try_get("title")
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        let cost: i64 = reward_row
            .try_get("cost")
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        let stock: i64 = reward_row
            .try_get("stock")
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        let is_active: i64 = reward_row
            .try_get("is_active")
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        if is_active == 0 || stock == 0 {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            return Ok(RedeemOutcome::Unavailable);
        }

        // Conditional debit: only succeeds while the balance still covers
        // the cost.
        let debited = sqlx::query(
            "UPDATE users SET eco_coins = eco_coins - $1, updated_at = $2 \
             WHERE id = $3 AND eco_coins >= $1",
        )
        .bind(cost)
        .bind(crate::repositories::format_timestamp(&chrono::Utc::now()))
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::TransactionError(e.to_string()))?;

        if debited.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            return Ok(RedeemOutcome::InsufficientCoins);
        }

        // Conditional decrement for tracked stock: only succeeds while a
        // unit remains.
        if stock != -1 {
            let decremented = sqlx::query(
                "UPDATE rewards SET stock = stock - 1 WHERE id = $1 AND stock > 0",
            )
            .bind(reward_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

            if decremented.rows_affected() == 0 {
                tx.rollback()
                    .await
                    .map_err(|e| DbError::TransactionError(e.to_string()))?;
                return Ok(RedeemOutcome::Unavailable);
            }
        }

        let balance_row = sqlx::query("SELECT eco_coins FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        let new_balance: i64 = balance_row
            .try_get("eco_coins")
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!(
            "User {} redeemed '{}' for {} coins (balance now {})",
            user_id, title, cost, new_balance
        );
        Ok(RedeemOutcome::Redeemed { new_balance, title })
    }
}
