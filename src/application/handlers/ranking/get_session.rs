//! GetSessionHandler - Query handler for current session state.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::ranking::RankingError;
use crate::ports::{ItemCatalog, SessionStore, VoteLog};

use super::loader::load_session;
use super::views::{session_view, SessionView};

/// Query for a session's current state.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for session queries.
///
/// Read-only and valid mid-ranking: the standings it returns are the
/// current intermediate order, not a final result.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
    votes: Arc<dyn VoteLog>,
    catalog: Arc<dyn ItemCatalog>,
}

impl GetSessionHandler {
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

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, RankingError> {
        let session =
            load_session(self.store.as_ref(), self.votes.as_ref(), &query.session_id).await?;
        Ok(session_view(self.catalog.as_ref(), &session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{InMemoryStore, StaticCatalog};
    use crate::domain::foundation::ItemId;
    use crate::domain::pool::PoolSize;
    use crate::domain::ranking::RankingSession;

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    async fn seeded_handler(ids: &[&str]) -> (GetSessionHandler, Arc<InMemoryStore>, SessionId) {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Arc::new(StaticCatalog::with_ids(ids));

        let session = RankingSession::start(
            SessionId::new(),
            None,
            PoolSize::Ten,
            ids.iter().map(|id| item(id)).collect(),
        )
        .unwrap();
        let session_id = *session.id();
        store.save(&session).await.unwrap();

        let handler = GetSessionHandler::new(store.clone(), store.clone(), catalog);
        (handler, store, session_id)
    }

    #[tokio::test]
    async fn returns_fresh_session_state() {
        let (handler, _, session_id) = seeded_handler(&["a", "b", "c"]).await;

        let view = handler.handle(GetSessionQuery { session_id }).await.unwrap();
        assert_eq!(view.session_id, session_id);
        assert_eq!(view.pool_size, 10);
        assert_eq!(view.votes_completed, 0);
        assert_eq!(view.total_matchups, Some(3));
        assert!(!view.is_complete);
        assert!(view.share_token.is_none());
        assert_eq!(view.current_rankings.len(), 3);
    }

    #[tokio::test]
    async fn initial_rankings_keep_pool_order() {
        let (handler, _, session_id) = seeded_handler(&["c", "a", "b"]).await;

        let view = handler.handle(GetSessionQuery { session_id }).await.unwrap();
        let order: Vec<&str> = view
            .current_rankings
            .iter()
            .map(|e| e.item_id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn unknown_session_fails() {
        let (handler, _, _) = seeded_handler(&["a", "b"]).await;

        let result = handler
            .handle(GetSessionQuery {
                session_id: SessionId::new(),
            })
            .await;
        assert!(matches!(result, Err(RankingError::NotFound(_))));
    }

    #[tokio::test]
    async fn repeated_queries_return_identical_views() {
        let (handler, _, session_id) = seeded_handler(&["a", "b", "c"]).await;

        let first = handler.handle(GetSessionQuery { session_id }).await.unwrap();
        let second = handler.handle(GetSessionQuery { session_id }).await.unwrap();
        assert_eq!(first, second);
    }
}
