//! SQL implementation of the user repository

use crate::error::DbError;
use crate::repositories::users::UserRepository;
use crate::repositories::{format_timestamp, parse_timestamp};
use crate::DbClient;
use ecobin_common::models::{Role, User};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

/// SQL implementation of the user repository
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    db_client: DbClient,
}

impl SqlUserRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, full_name, avatar_url, password_hash, role, eco_coins, \
     refresh_token, created_at, updated_at";

fn map_user(row: &AnyRow) -> Result<User, DbError> {
    let role_text: String = row
        .try_get("role")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let role = Role::parse(&role_text)
        .ok_or_else(|| DbError::QueryError(format!("unknown role '{role_text}'")))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let updated_at: String = row
        .try_get("updated_at")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    Ok(User {
        id: row.try_get("id").map_err(|e| DbError::QueryError(e.to_string()))?,
        username: row
            .try_get("username")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        full_name: row
            .try_get("full_name")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        avatar: row
            .try_get("avatar_url")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        role,
        eco_coins: row
            .try_get("eco_coins")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        refresh_token: row
            .try_get("refresh_token")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

impl UserRepository for SqlUserRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing users schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                full_name TEXT NOT NULL,
                avatar_url TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'USER',
                eco_coins BIGINT NOT NULL DEFAULT 0,
                refresh_token TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, user: User) -> Result<User, DbError> {
        debug!("Creating user: {}", user.username);

        let query = format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        );

        sqlx::query(&query)
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.avatar)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.eco_coins)
            .bind(&user.refresh_token)
            .bind(format_timestamp(&user.created_at))
            .bind(format_timestamp(&user.updated_at))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                DbError::from_write_error(
                    e,
                    "User with this email or username already exists",
                )
            })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(map_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let row = sqlx::query(&query)
            .bind(username.to_lowercase())
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(map_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&query)
            .bind(email.to_lowercase())
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(map_user).transpose()
    }

    async fn set_refresh_token(
        &self,
        user_id: &str,
        refresh_token: Option<&str>,
    ) -> Result<bool, DbError> {
        let query = "UPDATE users SET refresh_token = $1, updated_at = $2 WHERE id = $3";
        let result = sqlx::query(query)
            .bind(refresh_token)
            .bind(format_timestamp(&chrono::Utc::now()))
            .bind(user_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
