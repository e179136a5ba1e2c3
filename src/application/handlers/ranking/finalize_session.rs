//! FinalizeSessionHandler - Command handler for explicit completion.

use std::sync::Arc;

use crate::domain::foundation::{OwnerToken, SessionId, ShareToken};
use crate::domain::ranking::RankingError;
use crate::ports::{ItemCatalog, SessionStore, VoteLog};

use super::loader::load_session;
use super::views::{ranking_views, RankingEntryView};
use super::MAX_WRITE_ATTEMPTS;

/// Command to finalize a session.
#[derive(Debug, Clone)]
pub struct FinalizeSessionCommand {
    pub session_id: SessionId,
    pub caller: Option<OwnerToken>,
    pub request_share: bool,
}

/// Result of finalization.
#[derive(Debug, Clone)]
pub struct FinalizeSessionResult {
    pub final_rankings: Vec<RankingEntryView>,
    pub share_token: Option<ShareToken>,
}

/// Handler for explicit finalization.
///
/// The escape hatch for unbounded or abandoned sessions: completion no
/// longer waits for round-robin exhaustion. Finalizing an already-complete
/// session is a no-op that still returns (and may newly assign) the share
/// token.
pub struct FinalizeSessionHandler {
    store: Arc<dyn SessionStore>,
    votes: Arc<dyn VoteLog>,
    catalog: Arc<dyn ItemCatalog>,
}

impl FinalizeSessionHandler {
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

    pub async fn handle(
        &self,
        cmd: FinalizeSessionCommand,
    ) -> Result<FinalizeSessionResult, RankingError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut session =
                load_session(self.store.as_ref(), self.votes.as_ref(), &cmd.session_id).await?;

            session.authorize(cmd.caller.as_ref())?;

            let was_complete = session.is_complete();
            let had_token = session.share_token().is_some();
            let expected_version = session.version();

            let share_token = session.finalize(cmd.request_share);

            // Nothing changed: idempotent repeat call, no write needed.
            if was_complete && (had_token || !cmd.request_share) {
                return Ok(FinalizeSessionResult {
                    final_rankings: ranking_views(self.catalog.as_ref(), &session.standings()),
                    share_token,
                });
            }

            let applied = self.store.update(&session, expected_version).await?;
            if applied {
                tracing::info!(
                    session_id = %cmd.session_id,
                    votes = session.votes_completed(),
                    shared = share_token.is_some(),
                    "ranking session finalized"
                );
                return Ok(FinalizeSessionResult {
                    final_rankings: ranking_views(self.catalog.as_ref(), &session.standings()),
                    share_token,
                });
            }

            tracing::warn!(
                session_id = %cmd.session_id,
                attempt,
                "finalize lost a concurrent session update; retrying"
            );
        }

        Err(RankingError::conflict(
            "session was updated concurrently; retry finalization",
        ))
    }
}
