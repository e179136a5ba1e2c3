//! Shared in-memory port implementations for handler unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, SessionId, ShareToken};
use crate::domain::pool::CustomPool;
use crate::domain::ranking::{MatchupVote, RankingSession};
use crate::ports::{
    CustomPoolStore, ItemCard, ItemCatalog, ItemProfile, SessionSnapshot, SessionStore, VoteLog,
};

/// In-memory session store + vote log with version-guarded writes.
///
/// `fail_next_conditional_writes` simulates losing the optimistic
/// concurrency race: the next N conditional writes report a stale guard
/// without applying anything.
pub struct InMemoryStore {
    sessions: Mutex<HashMap<SessionId, SessionSnapshot>>,
    votes: Mutex<Vec<MatchupVote>>,
    forced_conflicts: Mutex<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            votes: Mutex::new(Vec::new()),
            forced_conflicts: Mutex::new(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }

    pub fn fail_next_conditional_writes(&self, count: usize) {
        *self.forced_conflicts.lock().unwrap() = count;
    }

    fn take_forced_conflict(&self) -> bool {
        let mut remaining = self.forced_conflicts.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }

    fn guarded_write(
        &self,
        session: &RankingSession,
        expected_version: i64,
    ) -> Result<bool, DomainError> {
        if self.take_forced_conflict() {
            return Ok(false);
        }

        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions.get(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("update of unknown session {}", session.id()),
            )
        })?;

        if stored.version != expected_version {
            return Ok(false);
        }

        let mut snapshot = SessionSnapshot::of(session);
        snapshot.version = expected_version + 1;
        sessions.insert(session.id().to_owned(), snapshot);
        Ok(true)
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn save(&self, session: &RankingSession) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(*session.id(), SessionSnapshot::of(session));
        Ok(())
    }

    async fn update(
        &self,
        session: &RankingSession,
        expected_version: i64,
    ) -> Result<bool, DomainError> {
        self.guarded_write(session, expected_version)
    }

    async fn persist_vote(
        &self,
        session: &RankingSession,
        expected_version: i64,
        vote: &MatchupVote,
    ) -> Result<bool, DomainError> {
        let applied = self.guarded_write(session, expected_version)?;
        if applied {
            self.votes.lock().unwrap().push(vote.clone());
        }
        Ok(applied)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionSnapshot>, DomainError> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn find_by_share_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<SessionSnapshot>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .find(|snapshot| snapshot.share_token.as_ref() == Some(token))
            .cloned())
    }
}

#[async_trait]
impl VoteLog for InMemoryStore {
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<MatchupVote>, DomainError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|vote| &vote.session_id == session_id)
            .cloned()
            .collect())
    }
}

/// In-memory custom pool store.
pub struct InMemoryPoolStore {
    pools: Mutex<Vec<CustomPool>>,
}

impl InMemoryPoolStore {
    pub fn new() -> Self {
        Self {
            pools: Mutex::new(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pools.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl CustomPoolStore for InMemoryPoolStore {
    async fn save(&self, pool: &CustomPool) -> Result<(), DomainError> {
        self.pools.lock().unwrap().push(pool.clone());
        Ok(())
    }

    async fn find_by_share_code(
        &self,
        code: &ShareToken,
    ) -> Result<Option<CustomPool>, DomainError> {
        Ok(self
            .pools
            .lock()
            .unwrap()
            .iter()
            .find(|pool| pool.share_code() == code)
            .cloned())
    }
}

/// Fixed catalog whose cards are derived from the id ("p01" -> "Player p01").
pub struct StaticCatalog {
    ids: Vec<ItemId>,
}

impl StaticCatalog {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| ItemId::new(*id).unwrap()).collect(),
        }
    }
}

impl ItemCatalog for StaticCatalog {
    fn ranked_ids(&self) -> &[ItemId] {
        &self.ids
    }

    fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    fn card(&self, id: &ItemId) -> Option<ItemCard> {
        self.contains(id).then(|| ItemCard {
            id: id.clone(),
            name: format!("Player {}", id),
            team: None,
            position: None,
        })
    }

    fn profile(&self, _id: &ItemId) -> Option<ItemProfile> {
        None
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}
