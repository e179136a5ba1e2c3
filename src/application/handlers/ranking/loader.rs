//! Session hydration from snapshot plus vote log.

use std::collections::HashSet;

use crate::domain::foundation::SessionId;
use crate::domain::ranking::{ItemPair, RankingError, RankingSession};
use crate::ports::{SessionSnapshot, SessionStore, VoteLog};

/// Loads a session by id and rebuilds its completed-pair set from the vote
/// log.
///
/// # Errors
///
/// - `NotFound` if no session has this id
/// - `Infrastructure` if the stored state violates an aggregate invariant
pub(crate) async fn load_session(
    store: &dyn SessionStore,
    votes: &dyn VoteLog,
    id: &SessionId,
) -> Result<RankingSession, RankingError> {
    let snapshot = store
        .find_by_id(id)
        .await?
        .ok_or(RankingError::NotFound(*id))?;
    hydrate(snapshot, votes).await
}

/// Reconstitutes a session aggregate from its snapshot and vote trail.
pub(crate) async fn hydrate(
    snapshot: SessionSnapshot,
    votes: &dyn VoteLog,
) -> Result<RankingSession, RankingError> {
    let log = votes.list_for_session(&snapshot.id).await?;
    let completed_pairs: HashSet<ItemPair> = log.iter().map(|vote| vote.pair()).collect();

    let session = RankingSession::reconstitute(
        snapshot.id,
        snapshot.owner,
        snapshot.pool_size,
        snapshot.pool,
        snapshot.ratings,
        completed_pairs,
        snapshot.votes_completed,
        snapshot.total_matchups,
        snapshot.is_complete,
        snapshot.share_token,
        snapshot.version,
        snapshot.created_at,
        snapshot.updated_at,
    )?;

    Ok(session)
}
