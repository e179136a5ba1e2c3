//! Ranking session aggregate.
//!
//! The central stateful entity: a fixed pool of items, per-item ratings,
//! the set of pairs already compared, and the completion flag. One accepted
//! vote advances `ratings`, `completed_pairs`, and `votes_completed`
//! together; nothing else mutates them.
//!
//! # Ownership
//!
//! A session may be owned by the anonymous session or user that created it.
//! Unowned sessions accept votes from anyone.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{
    DomainError, ErrorCode, ItemId, OwnerToken, SessionId, ShareToken, Timestamp,
};
use crate::domain::pool::PoolSize;

use super::pair::ItemPair;
use super::rating::{elo_update, Rating, K_FACTOR};
use super::selector::next_matchup;
use super::standings::{materialize, StandingEntry};

/// What one accepted vote did to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    /// The matchup the vote decided.
    pub pair: ItemPair,
    /// The winning item.
    pub winner: ItemId,
    /// The losing item.
    pub loser: ItemId,
    /// The next matchup to present, if the session continues.
    pub next_matchup: Option<ItemPair>,
    /// Whether this vote completed the session.
    pub completed_now: bool,
}

/// Ranking session aggregate.
///
/// # Invariants
///
/// - `pool` holds >= 2 distinct items and never changes after creation
/// - every pool item has exactly one `ratings` entry
/// - `votes_completed == completed_pairs.len()` at all times
/// - `is_complete` transitions false -> true exactly once
/// - `share_token`, once assigned, never changes
#[derive(Debug, Clone, PartialEq)]
pub struct RankingSession {
    id: SessionId,
    owner: Option<OwnerToken>,
    pool_size: PoolSize,
    pool: Vec<ItemId>,
    ratings: HashMap<ItemId, Rating>,
    completed_pairs: HashSet<ItemPair>,
    votes_completed: u32,
    total_matchups: Option<u32>,
    is_complete: bool,
    share_token: Option<ShareToken>,
    version: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl RankingSession {
    /// Start a new session over an already-resolved pool.
    ///
    /// Every item starts at 1500 with no results. Bounded sessions fix
    /// `total_matchups` at n*(n-1)/2 from the actual pool length.
    ///
    /// # Errors
    ///
    /// - `InvalidPool` if the pool has fewer than 2 items or duplicates
    pub fn start(
        id: SessionId,
        owner: Option<OwnerToken>,
        pool_size: PoolSize,
        pool: Vec<ItemId>,
    ) -> Result<Self, DomainError> {
        if pool.len() < 2 {
            return Err(DomainError::new(
                ErrorCode::InvalidPool,
                "need at least 2 items to rank",
            ));
        }
        let distinct: HashSet<&ItemId> = pool.iter().collect();
        if distinct.len() != pool.len() {
            return Err(DomainError::new(
                ErrorCode::InvalidPool,
                "pool contains duplicate items",
            ));
        }

        let ratings = pool
            .iter()
            .map(|item| (item.clone(), Rating::initial()))
            .collect();

        let n = pool.len() as u32;
        let total_matchups = pool_size.is_bounded().then(|| n * (n - 1) / 2);

        let now = Timestamp::now();
        Ok(Self {
            id,
            owner,
            pool_size,
            pool,
            ratings,
            completed_pairs: HashSet::new(),
            votes_completed: 0,
            total_matchups,
            is_complete: false,
            share_token: None,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from its persisted snapshot and vote log.
    ///
    /// The ratings snapshot and pair set come from storage, so the basic
    /// consistency guarantees are re-checked here; a mismatch means the
    /// stored state is corrupt rather than a caller error.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the snapshot violates an aggregate invariant
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        owner: Option<OwnerToken>,
        pool_size: PoolSize,
        pool: Vec<ItemId>,
        ratings: HashMap<ItemId, Rating>,
        completed_pairs: HashSet<ItemPair>,
        votes_completed: u32,
        total_matchups: Option<u32>,
        is_complete: bool,
        share_token: Option<ShareToken>,
        version: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if pool.len() < 2 {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("stored session {} has a pool of {} items", id, pool.len()),
            ));
        }
        if pool.iter().any(|item| !ratings.contains_key(item)) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("stored session {} is missing ratings for pool items", id),
            ));
        }
        if votes_completed as usize != completed_pairs.len() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!(
                    "stored session {} counts {} votes but {} completed pairs",
                    id,
                    votes_completed,
                    completed_pairs.len()
                ),
            ));
        }

        Ok(Self {
            id,
            owner,
            pool_size,
            pool,
            ratings,
            completed_pairs,
            votes_completed,
            total_matchups,
            is_complete,
            share_token,
            version,
            created_at,
            updated_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn owner(&self) -> Option<&OwnerToken> {
        self.owner.as_ref()
    }

    pub fn pool_size(&self) -> PoolSize {
        self.pool_size
    }

    pub fn pool(&self) -> &[ItemId] {
        &self.pool
    }

    pub fn ratings(&self) -> &HashMap<ItemId, Rating> {
        &self.ratings
    }

    pub fn completed_pairs(&self) -> &HashSet<ItemPair> {
        &self.completed_pairs
    }

    pub fn votes_completed(&self) -> u32 {
        self.votes_completed
    }

    pub fn total_matchups(&self) -> Option<u32> {
        self.total_matchups
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn share_token(&self) -> Option<&ShareToken> {
        self.share_token.as_ref()
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the caller may mutate this session.
    ///
    /// Unowned sessions accept any caller.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the session has an owner and the caller is not it
    pub fn authorize(&self, caller: Option<&OwnerToken>) -> Result<(), DomainError> {
        match (&self.owner, caller) {
            (None, _) => Ok(()),
            (Some(owner), Some(caller)) if owner == caller => Ok(()),
            _ => Err(DomainError::new(
                ErrorCode::Forbidden,
                "Caller does not own this ranking session",
            )),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The pending matchup, re-derived from current state.
    ///
    /// Never persisted: the selector is a pure function of the ratings and
    /// the completed-pair set, so GETs and votes always agree on it.
    pub fn pending_matchup(&self) -> Option<ItemPair> {
        if self.is_complete {
            return None;
        }
        next_matchup(
            &self.pool,
            &self.ratings,
            &self.completed_pairs,
            self.total_matchups,
        )
    }

    /// Current standings, orderable at any point in the session's life.
    pub fn standings(&self) -> Vec<StandingEntry> {
        materialize(&self.pool, &self.ratings)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply one comparison outcome.
    ///
    /// The pending matchup is re-derived, the claimed winner checked against
    /// it, and then ratings, win/loss counters, the pair set, and the vote
    /// counter advance together. If no further matchup exists afterwards the
    /// session completes and receives a share token.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the session is already finished
    /// - `NoPendingMatchup` if no matchup can be derived (consistency guard)
    /// - `InvalidWinner` if `winner` is not part of the pending matchup
    pub fn apply_vote(&mut self, winner: &ItemId) -> Result<VoteOutcome, DomainError> {
        if self.is_complete {
            return Err(DomainError::new(
                ErrorCode::SessionComplete,
                "Ranking is already complete",
            ));
        }

        let pair = self.pending_matchup().ok_or_else(|| {
            DomainError::new(ErrorCode::NoPendingMatchup, "No pending matchup")
        })?;

        let loser = pair
            .other(winner)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InvalidWinner,
                    format!("Winner is not part of the pending matchup ({})", pair),
                )
                .with_detail("expected_a", pair.first().as_str())
                .with_detail("expected_b", pair.second().as_str())
            })?
            .clone();
        let winner = winner.clone();

        let winner_score = self.ratings[&winner].score;
        let loser_score = self.ratings[&loser].score;
        let (new_winner_score, new_loser_score) =
            elo_update(winner_score, loser_score, K_FACTOR);

        // The critical section: these four advance atomically or not at all.
        self.ratings
            .get_mut(&winner)
            .expect("winner is in the pool")
            .record_win(new_winner_score);
        self.ratings
            .get_mut(&loser)
            .expect("loser is in the pool")
            .record_loss(new_loser_score);
        self.completed_pairs.insert(pair.clone());
        self.votes_completed = self.completed_pairs.len() as u32;
        self.updated_at = Timestamp::now();

        let next = self.pending_matchup();
        let completed_now = next.is_none();
        if completed_now {
            self.is_complete = true;
            if self.share_token.is_none() {
                self.share_token = Some(ShareToken::generate());
            }
        }

        Ok(VoteOutcome {
            pair,
            winner,
            loser,
            next_matchup: next,
            completed_now,
        })
    }

    /// Explicitly finalize the session.
    ///
    /// The escape hatch for unbounded or abandoned sessions: marks the
    /// session complete regardless of remaining matchups and, when
    /// requested, assigns a share token if none exists. Idempotent with
    /// respect to completion; a repeat call returns the existing token.
    pub fn finalize(&mut self, request_share: bool) -> Option<ShareToken> {
        if !self.is_complete {
            self.is_complete = true;
            self.updated_at = Timestamp::now();
        }
        if request_share && self.share_token.is_none() {
            self.share_token = Some(ShareToken::generate());
            self.updated_at = Timestamp::now();
        }
        self.share_token.clone()
    }

    /// Bump the persistence version after a successful conditional write.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }
}
