//! SubmitVoteHandler - Command handler for applying one comparison outcome.

use std::sync::Arc;

use crate::domain::foundation::{ItemId, OwnerToken, SessionId};
use crate::domain::ranking::{MatchupVote, RankingError};
use crate::ports::{ItemCatalog, SessionStore, VoteLog};

use super::loader::load_session;
use super::views::{matchup_view, ranking_views, MatchupView, RankingEntryView};
use super::MAX_WRITE_ATTEMPTS;

/// Command to submit one vote.
#[derive(Debug, Clone)]
pub struct SubmitVoteCommand {
    pub session_id: SessionId,
    pub winner: ItemId,
    pub caller: Option<OwnerToken>,
}

/// Result of an accepted vote.
#[derive(Debug, Clone)]
pub struct SubmitVoteResult {
    pub votes_completed: u32,
    pub total_matchups: Option<u32>,
    pub current_rankings: Vec<RankingEntryView>,
    pub next_matchup: Option<MatchupView>,
    pub is_complete: bool,
}

/// Handler for vote submission.
///
/// The whole read-validate-apply-write cycle runs under optimistic
/// concurrency: a conditional write that loses the per-session race is
/// retried from a fresh load, so two racing votes are applied one after the
/// other rather than rejected or merged.
pub struct SubmitVoteHandler {
    store: Arc<dyn SessionStore>,
    votes: Arc<dyn VoteLog>,
    catalog: Arc<dyn ItemCatalog>,
}

impl SubmitVoteHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        votes: Arc<dyn VoteLog>,
        catalog: Arc<dyn ItemCatalog>,
    ) -> Self {
        Self {
            store,
            votes,
            catalog,
        }
    }

    pub async fn handle(&self, cmd: SubmitVoteCommand) -> Result<SubmitVoteResult, RankingError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut session =
                load_session(self.store.as_ref(), self.votes.as_ref(), &cmd.session_id).await?;

            session.authorize(cmd.caller.as_ref())?;

            let expected_version = session.version();
            let outcome = session.apply_vote(&cmd.winner)?;
            let vote = MatchupVote::new(*session.id(), &outcome.pair, outcome.winner.clone());

            let applied = self
                .store
                .persist_vote(&session, expected_version, &vote)
                .await?;

            if applied {
                if outcome.completed_now {
                    tracing::info!(
                        session_id = %cmd.session_id,
                        votes = session.votes_completed(),
                        "ranking session completed"
                    );
                }

                let next_matchup = outcome
                    .next_matchup
                    .map(|pair| matchup_view(self.catalog.as_ref(), &pair));

                return Ok(SubmitVoteResult {
                    votes_completed: session.votes_completed(),
                    total_matchups: session.total_matchups(),
                    current_rankings: ranking_views(self.catalog.as_ref(), &session.standings()),
                    next_matchup,
                    is_complete: session.is_complete(),
                });
            }

            tracing::warn!(
                session_id = %cmd.session_id,
                attempt,
                "vote lost a concurrent session update; retrying"
            );
        }

        Err(RankingError::conflict(
            "session was updated concurrently; resubmit the vote",
        ))
    }
}
