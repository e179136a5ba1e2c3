//! PostgreSQL implementation of CustomPoolStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ItemId, OwnerToken, PoolId, ShareToken, Timestamp};
use crate::domain::pool::CustomPool;
use crate::ports::CustomPoolStore;

use super::db_error;

/// PostgreSQL implementation of CustomPoolStore.
#[derive(Clone)]
pub struct PostgresCustomPoolStore {
    pool: PgPool,
}

impl PostgresCustomPoolStore {
    /// Creates a new PostgresCustomPoolStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomPoolStore for PostgresCustomPoolStore {
    async fn save(&self, custom_pool: &CustomPool) -> Result<(), DomainError> {
        let item_ids = serde_json::to_string(custom_pool.items())
            .map_err(|e| db_error("Failed to encode item_ids", e))?;

        sqlx::query(
            r#"
            INSERT INTO custom_pools (
                id, owner_token, name, description, item_ids,
                share_code, is_public, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(custom_pool.id().as_uuid())
        .bind(custom_pool.owner().map(|o| o.as_str()))
        .bind(custom_pool.name())
        .bind(custom_pool.description())
        .bind(item_ids)
        .bind(custom_pool.share_code().as_str())
        .bind(custom_pool.is_public())
        .bind(custom_pool.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert custom pool", e))?;

        Ok(())
    }

    async fn find_by_share_code(
        &self,
        code: &ShareToken,
    ) -> Result<Option<CustomPool>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_token, name, description, item_ids,
                   share_code, is_public, created_at
            FROM custom_pools
            WHERE share_code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch custom pool", e))?;

        row.map(row_to_pool).transpose()
    }
}

fn row_to_pool(row: sqlx::postgres::PgRow) -> Result<CustomPool, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| db_error("Failed to get id", e))?;

    let owner_token: Option<String> = row
        .try_get("owner_token")
        .map_err(|e| db_error("Failed to get owner_token", e))?;
    let owner = owner_token
        .map(OwnerToken::new)
        .transpose()
        .map_err(|e| db_error("Invalid owner_token", e))?;

    let name: String = row
        .try_get("name")
        .map_err(|e| db_error("Failed to get name", e))?;

    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| db_error("Failed to get description", e))?;

    let item_ids_json: String = row
        .try_get("item_ids")
        .map_err(|e| db_error("Failed to get item_ids", e))?;
    let items: Vec<ItemId> = serde_json::from_str(&item_ids_json)
        .map_err(|e| db_error("Failed to decode item_ids", e))?;

    let share_code: String = row
        .try_get("share_code")
        .map_err(|e| db_error("Failed to get share_code", e))?;
    let share_code = ShareToken::new(share_code).map_err(|e| db_error("Invalid share_code", e))?;

    let is_public: bool = row
        .try_get("is_public")
        .map_err(|e| db_error("Failed to get is_public", e))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    Ok(CustomPool::reconstitute(
        PoolId::from_uuid(id),
        owner,
        name,
        description,
        items,
        share_code,
        is_public,
        Timestamp::from_datetime(created_at),
    ))
}
