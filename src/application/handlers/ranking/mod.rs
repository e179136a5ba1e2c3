//! Ranking session handlers.
//!
//! One handler per engine operation: start, vote, query, finalize, shared
//! lookup. Votes and finalization run under optimistic concurrency with
//! bounded retries; queries are pure reads.

mod finalize_session;
mod get_session;
mod get_shared_session;
mod loader;
mod start_session;
mod submit_vote;
mod views;

pub use finalize_session::{
    FinalizeSessionCommand, FinalizeSessionHandler, FinalizeSessionResult,
};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use get_shared_session::{GetSharedSessionHandler, GetSharedSessionQuery};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use submit_vote::{SubmitVoteCommand, SubmitVoteHandler, SubmitVoteResult};
pub use views::{MatchupSide, MatchupView, RankingEntryView, SessionView};

/// Attempts per optimistic-concurrency retry loop before surfacing a
/// conflict to the caller.
pub(crate) const MAX_WRITE_ATTEMPTS: usize = 3;
