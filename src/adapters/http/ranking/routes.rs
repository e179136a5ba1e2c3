//! HTTP routes for ranking session endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    finalize_session, get_session, get_shared_session, start_session, submit_vote,
    RankingHandlers,
};

/// Creates the ranking router with all endpoints.
pub fn ranking_routes(handlers: RankingHandlers) -> Router {
    Router::new()
        .route("/start", post(start_session))
        .route("/:id", get(get_session))
        .route("/:id/vote", put(submit_vote))
        .route("/:id/complete", post(finalize_session))
        .route("/share/:token", get(get_shared_session))
        .with_state(handlers)
}
