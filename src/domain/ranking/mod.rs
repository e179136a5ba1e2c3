//! Ranking module - adaptive pairwise ranking engine.
//!
//! A ranking session presents head-to-head matchups, folds each vote into
//! per-item Elo ratings, and materializes a live total order. Bounded
//! sessions finish when every pair has been compared; unbounded sessions
//! finish only on explicit finalization.
//!
//! Cyclic outcomes (A over B, B over C, C over A) are accepted without
//! detection; the ratings absorb them and the materialized order remains
//! total.

mod errors;
mod pair;
mod rating;
mod selector;
mod session;
mod standings;
mod vote;

pub use errors::RankingError;
pub use pair::ItemPair;
pub use rating::{elo_update, expected_score, Rating, INITIAL_SCORE, K_FACTOR};
pub use selector::next_matchup;
pub use session::{RankingSession, VoteOutcome};
pub use standings::{materialize, StandingEntry};
pub use vote::{replay_votes, MatchupVote};
