//! PostgreSQL implementation of VoteLog.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ItemId, SessionId, Timestamp};
use crate::domain::ranking::MatchupVote;
use crate::ports::VoteLog;

use super::db_error;

/// PostgreSQL implementation of VoteLog.
#[derive(Clone)]
pub struct PostgresVoteLog {
    pool: PgPool,
}

impl PostgresVoteLog {
    /// Creates a new PostgresVoteLog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteLog for PostgresVoteLog {
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<MatchupVote>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT session_id, item_a, item_b, winner_id, created_at
            FROM matchup_votes
            WHERE session_id = $1
            ORDER BY id
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch matchup votes", e))?;

        rows.into_iter().map(row_to_vote).collect()
    }
}

fn row_to_vote(row: sqlx::postgres::PgRow) -> Result<MatchupVote, DomainError> {
    let session_id: uuid::Uuid = row
        .try_get("session_id")
        .map_err(|e| db_error("Failed to get session_id", e))?;

    let item_a: String = row
        .try_get("item_a")
        .map_err(|e| db_error("Failed to get item_a", e))?;
    let item_b: String = row
        .try_get("item_b")
        .map_err(|e| db_error("Failed to get item_b", e))?;
    let winner_id: String = row
        .try_get("winner_id")
        .map_err(|e| db_error("Failed to get winner_id", e))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    Ok(MatchupVote {
        session_id: SessionId::from_uuid(session_id),
        item_a: ItemId::new(item_a).map_err(|e| db_error("Invalid item_a", e))?,
        item_b: ItemId::new(item_b).map_err(|e| db_error("Invalid item_b", e))?,
        winner: ItemId::new(winner_id).map_err(|e| db_error("Invalid winner_id", e))?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
