//! Matchup vote records.
//!
//! Votes are append-only: the live ratings map is a denormalized cache of
//! repeated vote application, and replaying the log from initial ratings in
//! insertion order must reproduce it exactly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, SessionId, Timestamp};

use super::pair::ItemPair;
use super::rating::{elo_update, Rating, K_FACTOR};

/// One recorded comparison outcome. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupVote {
    pub session_id: SessionId,
    pub item_a: ItemId,
    pub item_b: ItemId,
    pub winner: ItemId,
    pub created_at: Timestamp,
}

impl MatchupVote {
    /// Records the decision of one matchup.
    pub fn new(session_id: SessionId, pair: &ItemPair, winner: ItemId) -> Self {
        Self {
            session_id,
            item_a: pair.first().clone(),
            item_b: pair.second().clone(),
            winner,
            created_at: Timestamp::now(),
        }
    }

    /// The unordered pair this vote decided.
    pub fn pair(&self) -> ItemPair {
        ItemPair::new(self.item_a.clone(), self.item_b.clone())
            .expect("a stored vote joins two distinct items")
    }

    /// The losing side of the matchup.
    pub fn loser(&self) -> &ItemId {
        if self.winner == self.item_a {
            &self.item_b
        } else {
            &self.item_a
        }
    }
}

/// Replays a vote log from initial ratings, in insertion order.
///
/// Votes naming items outside the pool are skipped; the audit trail is the
/// source of truth and replay must stay total.
pub fn replay_votes(pool: &[ItemId], votes: &[MatchupVote]) -> HashMap<ItemId, Rating> {
    let mut ratings: HashMap<ItemId, Rating> = pool
        .iter()
        .map(|item| (item.clone(), Rating::initial()))
        .collect();

    for vote in votes {
        let loser = vote.loser().clone();
        let (Some(winner_rating), Some(loser_rating)) =
            (ratings.get(&vote.winner), ratings.get(&loser))
        else {
            continue;
        };

        let (new_winner, new_loser) =
            elo_update(winner_rating.score, loser_rating.score, K_FACTOR);

        if let Some(rating) = ratings.get_mut(&vote.winner) {
            rating.record_win(new_winner);
        }
        if let Some(rating) = ratings.get_mut(&loser) {
            rating.record_loss(new_loser);
        }
    }

    ratings
}
