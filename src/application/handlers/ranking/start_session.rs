//! StartSessionHandler - Command handler for starting ranking sessions.

use std::sync::Arc;

use crate::domain::foundation::{ItemId, OwnerToken, SessionId, ShareToken};
use crate::domain::pool::{resolve_pool, PoolSize};
use crate::domain::ranking::{RankingError, RankingSession};
use crate::ports::{CustomPoolStore, ItemCatalog, SessionStore};

use super::views::{matchup_view, MatchupView};

/// Command to start a new ranking session.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub owner: Option<OwnerToken>,
    pub pool_size: PoolSize,
    pub explicit_items: Option<Vec<ItemId>>,
    pub custom_pool_code: Option<ShareToken>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: RankingSession,
    pub first_matchup: MatchupView,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
    pools: Arc<dyn CustomPoolStore>,
    catalog: Arc<dyn ItemCatalog>,
}

impl StartSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        pools: Arc<dyn CustomPoolStore>,
        catalog: Arc<dyn ItemCatalog>,
    ) -> Self {
        Self {
            store,
            pools,
            catalog,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, RankingError> {
        // 1. Resolve the item pool: custom pool > explicit list > catalog head
        let custom_items = match &cmd.custom_pool_code {
            Some(code) => {
                let pool = self
                    .pools
                    .find_by_share_code(code)
                    .await?
                    .ok_or_else(|| RankingError::PoolNotFound(code.clone()))?;
                Some(pool.items().to_vec())
            }
            None => None,
        };

        let pool = resolve_pool(
            cmd.pool_size,
            custom_items,
            cmd.explicit_items,
            self.catalog.ranked_ids(),
        )?;

        // 2. Create and persist the aggregate
        let session = RankingSession::start(SessionId::new(), cmd.owner, cmd.pool_size, pool)?;
        self.store.save(&session).await?;

        // 3. Derive the opening matchup
        let first_pair = session.pending_matchup().ok_or_else(|| {
            RankingError::infrastructure("could not derive the first matchup")
        })?;

        tracing::info!(
            session_id = %session.id(),
            pool_len = session.pool().len(),
            pool_size = session.pool_size().wire(),
            "ranking session started"
        );

        Ok(StartSessionResult {
            first_matchup: matchup_view(self.catalog.as_ref(), &first_pair),
            session,
        })
    }
}
