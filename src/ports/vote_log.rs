//! Vote log port (read side).
//!
//! The append-only audit trail of accepted votes. Writes happen through
//! [`crate::ports::SessionStore::persist_vote`] so a vote and the snapshot
//! it produced commit together; this port only reads the trail back, in
//! insertion order, to rebuild completed-pair sets and replay ratings.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::ranking::MatchupVote;

/// Reader port over the append-only vote trail.
#[async_trait]
pub trait VoteLog: Send + Sync {
    /// All votes for a session, in insertion order.
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<MatchupVote>, DomainError>;
}
