//! GetSharedSessionHandler - Public lookup by share token.

use std::sync::Arc;

use crate::domain::foundation::ShareToken;
use crate::domain::ranking::RankingError;
use crate::ports::{ItemCatalog, SessionStore, VoteLog};

use super::loader::hydrate;
use super::views::{session_view, SessionView};

/// Query for a shared session's state.
#[derive(Debug, Clone)]
pub struct GetSharedSessionQuery {
    pub share_token: ShareToken,
}

/// Handler for shared lookups.
///
/// A share token grants read-only access without any ownership check.
pub struct GetSharedSessionHandler {
    store: Arc<dyn SessionStore>,
    votes: Arc<dyn VoteLog>,
    catalog: Arc<dyn ItemCatalog>,
}

impl GetSharedSessionHandler {
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
        query: GetSharedSessionQuery,
    ) -> Result<SessionView, RankingError> {
        let snapshot = self
            .store
            .find_by_share_token(&query.share_token)
            .await?
            .ok_or_else(|| RankingError::ShareTokenNotFound(query.share_token.clone()))?;

        let session = hydrate(snapshot, self.votes.as_ref()).await?;
        Ok(session_view(self.catalog.as_ref(), &session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{InMemoryStore, StaticCatalog};
    use crate::domain::foundation::{ItemId, OwnerToken, SessionId};
    use crate::domain::pool::PoolSize;
    use crate::domain::ranking::RankingSession;

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    async fn shared_session() -> (GetSharedSessionHandler, ShareToken, SessionId) {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Arc::new(StaticCatalog::with_ids(&["a", "b"]));

        // Owned session: the share token must still open it for anyone.
        let mut session = RankingSession::start(
            SessionId::new(),
            Some(OwnerToken::new("owner-1").unwrap()),
            PoolSize::Unbounded,
            vec![item("a"), item("b")],
        )
        .unwrap();
        let token = session.finalize(true).unwrap();
        let session_id = *session.id();
        store.save(&session).await.unwrap();

        let handler = GetSharedSessionHandler::new(store.clone(), store.clone(), catalog);
        (handler, token, session_id)
    }

    #[tokio::test]
    async fn share_token_opens_session_without_ownership() {
        let (handler, token, session_id) = shared_session().await;

        let view = handler
            .handle(GetSharedSessionQuery { share_token: token })
            .await
            .unwrap();
        assert_eq!(view.session_id, session_id);
        assert!(view.is_complete);
        assert!(view.share_token.is_some());
    }

    #[tokio::test]
    async fn unknown_token_fails() {
        let (handler, _, _) = shared_session().await;

        let result = handler
            .handle(GetSharedSessionQuery {
                share_token: ShareToken::generate(),
            })
            .await;
        assert!(matches!(result, Err(RankingError::ShareTokenNotFound(_))));
    }
}
