//! PostgreSQL implementation of SessionStore.
//!
//! Conditional updates are version-guarded (`WHERE version = $n`), and
//! `persist_vote` commits the snapshot update and the vote row in one
//! transaction so the snapshot and the audit trail cannot drift.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ItemId, OwnerToken, SessionId, ShareToken, Timestamp,
};
use crate::domain::pool::PoolSize;
use crate::domain::ranking::{MatchupVote, Rating, RankingSession};
use crate::ports::{SessionSnapshot, SessionStore};

use super::db_error;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn save(&self, session: &RankingSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO ranking_sessions (
                id, owner_token, pool_size, pool, ratings, votes_completed,
                total_matchups, is_complete, share_token, version,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.owner().map(|o| o.as_str()))
        .bind(session.pool_size().wire() as i32)
        .bind(encode_pool(session.pool())?)
        .bind(encode_ratings(session.ratings())?)
        .bind(session.votes_completed() as i32)
        .bind(session.total_matchups().map(|t| t as i32))
        .bind(session.is_complete())
        .bind(session.share_token().map(|t| t.as_str()))
        .bind(session.version())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert ranking session", e))?;

        Ok(())
    }

    async fn update(
        &self,
        session: &RankingSession,
        expected_version: i64,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE ranking_sessions SET
                ratings = $2,
                votes_completed = $3,
                is_complete = $4,
                share_token = $5,
                version = version + 1,
                updated_at = $6
            WHERE id = $1 AND version = $7
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(encode_ratings(session.ratings())?)
        .bind(session.votes_completed() as i32)
        .bind(session.is_complete())
        .bind(session.share_token().map(|t| t.as_str()))
        .bind(session.updated_at().as_datetime())
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update ranking session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn persist_vote(
        &self,
        session: &RankingSession,
        expected_version: i64,
        vote: &MatchupVote,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin vote transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE ranking_sessions SET
                ratings = $2,
                votes_completed = $3,
                is_complete = $4,
                share_token = $5,
                version = version + 1,
                updated_at = $6
            WHERE id = $1 AND version = $7
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(encode_ratings(session.ratings())?)
        .bind(session.votes_completed() as i32)
        .bind(session.is_complete())
        .bind(session.share_token().map(|t| t.as_str()))
        .bind(session.updated_at().as_datetime())
        .bind(expected_version)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update ranking session", e))?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| db_error("Failed to roll back vote transaction", e))?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO matchup_votes (session_id, item_a, item_b, winner_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(vote.session_id.as_uuid())
        .bind(vote.item_a.as_str())
        .bind(vote.item_b.as_str())
        .bind(vote.winner.as_str())
        .bind(vote.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert matchup vote", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit vote transaction", e))?;

        Ok(true)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_token, pool_size, pool, ratings, votes_completed,
                   total_matchups, is_complete, share_token, version,
                   created_at, updated_at
            FROM ranking_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch ranking session", e))?;

        row.map(row_to_snapshot).transpose()
    }

    async fn find_by_share_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<SessionSnapshot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_token, pool_size, pool, ratings, votes_completed,
                   total_matchups, is_complete, share_token, version,
                   created_at, updated_at
            FROM ranking_sessions
            WHERE share_token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch shared ranking session", e))?;

        row.map(row_to_snapshot).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn encode_pool(pool: &[ItemId]) -> Result<String, DomainError> {
    serde_json::to_string(pool).map_err(|e| db_error("Failed to encode pool", e))
}

fn encode_ratings(ratings: &HashMap<ItemId, Rating>) -> Result<String, DomainError> {
    serde_json::to_string(ratings).map_err(|e| db_error("Failed to encode ratings", e))
}

fn row_to_snapshot(row: sqlx::postgres::PgRow) -> Result<SessionSnapshot, DomainError> {
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

    let pool_size: i32 = row
        .try_get("pool_size")
        .map_err(|e| db_error("Failed to get pool_size", e))?;
    let pool_size = PoolSize::from_wire(pool_size as u32)
        .map_err(|e| db_error("Invalid pool_size", e))?;

    let pool_json: String = row
        .try_get("pool")
        .map_err(|e| db_error("Failed to get pool", e))?;
    let pool: Vec<ItemId> = serde_json::from_str(&pool_json)
        .map_err(|e| db_error("Failed to decode pool", e))?;

    let ratings_json: String = row
        .try_get("ratings")
        .map_err(|e| db_error("Failed to get ratings", e))?;
    let ratings: HashMap<ItemId, Rating> = serde_json::from_str(&ratings_json)
        .map_err(|e| db_error("Failed to decode ratings", e))?;

    let votes_completed: i32 = row
        .try_get("votes_completed")
        .map_err(|e| db_error("Failed to get votes_completed", e))?;

    let total_matchups: Option<i32> = row
        .try_get("total_matchups")
        .map_err(|e| db_error("Failed to get total_matchups", e))?;

    let is_complete: bool = row
        .try_get("is_complete")
        .map_err(|e| db_error("Failed to get is_complete", e))?;

    let share_token: Option<String> = row
        .try_get("share_token")
        .map_err(|e| db_error("Failed to get share_token", e))?;
    let share_token = share_token
        .map(ShareToken::new)
        .transpose()
        .map_err(|e| db_error("Invalid share_token", e))?;

    let version: i64 = row
        .try_get("version")
        .map_err(|e| db_error("Failed to get version", e))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("Failed to get updated_at", e))?;

    Ok(SessionSnapshot {
        id: SessionId::from_uuid(id),
        owner,
        pool_size,
        pool,
        ratings,
        votes_completed: votes_completed as u32,
        total_matchups: total_matchups.map(|t| t as u32),
        is_complete,
        share_token,
        version,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
