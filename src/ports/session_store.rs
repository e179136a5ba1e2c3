//! Session store port (write side).
//!
//! Persists ranking session snapshots. The completed-pair set is NOT part
//! of the snapshot: it is always reconstructed from the vote log, so the
//! snapshot and the log can never drift apart silently.
//!
//! # Concurrency
//!
//! A vote is a read-modify-write over one session. Implementations must
//! provide optimistic concurrency: conditional writes compare an expected
//! version and report whether they applied, and `persist_vote` commits the
//! updated snapshot together with its vote record atomically.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, ItemId, OwnerToken, SessionId, ShareToken, Timestamp,
};
use crate::domain::pool::PoolSize;
use crate::domain::ranking::{MatchupVote, Rating, RankingSession};

/// Persisted form of a ranking session, without the completed-pair set.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub owner: Option<OwnerToken>,
    pub pool_size: PoolSize,
    pub pool: Vec<ItemId>,
    pub ratings: HashMap<ItemId, Rating>,
    pub votes_completed: u32,
    pub total_matchups: Option<u32>,
    pub is_complete: bool,
    pub share_token: Option<ShareToken>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SessionSnapshot {
    /// Captures the persistable state of a live aggregate.
    pub fn of(session: &RankingSession) -> Self {
        Self {
            id: *session.id(),
            owner: session.owner().cloned(),
            pool_size: session.pool_size(),
            pool: session.pool().to_vec(),
            ratings: session.ratings().clone(),
            votes_completed: session.votes_completed(),
            total_matchups: session.total_matchups(),
            is_complete: session.is_complete(),
            share_token: session.share_token().cloned(),
            version: session.version(),
            created_at: *session.created_at(),
            updated_at: *session.updated_at(),
        }
    }
}

/// Store port for ranking session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Save a newly started session at version 0.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &RankingSession) -> Result<(), DomainError>;

    /// Conditionally update a session snapshot.
    ///
    /// Applies only if the stored version equals `expected_version`, and
    /// bumps the version on success. Returns `false` (without error) when
    /// the guard fails, so callers can reload and retry.
    async fn update(
        &self,
        session: &RankingSession,
        expected_version: i64,
    ) -> Result<bool, DomainError>;

    /// Conditionally update a session snapshot and append its vote record
    /// in the same transaction.
    ///
    /// Same version-guard semantics as [`SessionStore::update`]; on a failed
    /// guard neither the snapshot nor the vote is written.
    async fn persist_vote(
        &self,
        session: &RankingSession,
        expected_version: i64,
        vote: &MatchupVote,
    ) -> Result<bool, DomainError>;

    /// Find a session snapshot by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, DomainError>;

    /// Find a session snapshot by its public share token.
    ///
    /// Returns `None` if no session carries the token.
    async fn find_by_share_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<SessionSnapshot>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }

    #[test]
    fn snapshot_captures_aggregate_state() {
        let session = RankingSession::start(
            SessionId::new(),
            None,
            PoolSize::Ten,
            vec![ItemId::new("a").unwrap(), ItemId::new("b").unwrap()],
        )
        .unwrap();

        let snapshot = SessionSnapshot::of(&session);
        assert_eq!(snapshot.id, *session.id());
        assert_eq!(snapshot.votes_completed, 0);
        assert_eq!(snapshot.total_matchups, Some(1));
        assert!(!snapshot.is_complete);
        assert_eq!(snapshot.version, 0);
    }
}
