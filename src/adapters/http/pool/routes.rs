//! HTTP routes for custom pool endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_pool, get_pool, PoolHandlers};

/// Creates the custom pool router with all endpoints.
pub fn pool_routes(handlers: PoolHandlers) -> Router {
    Router::new()
        .route("/", post(create_pool))
        .route("/:code", get(get_pool))
        .with_state(handlers)
}
