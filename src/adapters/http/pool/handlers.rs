//! HTTP handlers for custom pool endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequesterIdentity;
use crate::adapters::http::ErrorResponse;
use crate::application::handlers::pool::{
    CreateCustomPoolCommand, CreateCustomPoolHandler, GetCustomPoolHandler, GetCustomPoolQuery,
};
use crate::domain::foundation::{ItemId, ShareToken};
use crate::domain::pool::PoolError;

use super::dto::{CreatePoolRequest, CreatePoolResponse, PoolResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PoolHandlers {
    create_handler: Arc<CreateCustomPoolHandler>,
    get_handler: Arc<GetCustomPoolHandler>,
}

impl PoolHandlers {
    pub fn new(
        create_handler: Arc<CreateCustomPoolHandler>,
        get_handler: Arc<GetCustomPoolHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/rankings/pools - Create a custom pool
pub async fn create_pool(
    State(handlers): State<PoolHandlers>,
    RequesterIdentity(owner): RequesterIdentity,
    Json(req): Json<CreatePoolRequest>,
) -> Response {
    let items: Result<Vec<ItemId>, _> = req.item_ids.into_iter().map(ItemId::new).collect();
    let items = match items {
        Ok(items) => items,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Item ids must be non-empty")),
            )
                .into_response()
        }
    };

    let cmd = CreateCustomPoolCommand {
        owner,
        name: req.name,
        description: req.description,
        items,
        is_public: req.is_public,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response = CreatePoolResponse {
                pool_id: result.pool.id().to_string(),
                share_code: result.pool.share_code().to_string(),
                name: result.pool.name().to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_pool_error(e),
    }
}

/// GET /api/rankings/pools/:code - Fetch a custom pool by share code
pub async fn get_pool(
    State(handlers): State<PoolHandlers>,
    Path(code): Path<String>,
) -> Response {
    let share_code = match ShareToken::new(code) {
        Ok(code) => code,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid share code")),
            )
                .into_response()
        }
    };

    match handlers.get_handler.handle(GetCustomPoolQuery { share_code }).await {
        Ok(view) => {
            let response: PoolResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_pool_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_pool_error(error: PoolError) -> Response {
    let status = match &error {
        PoolError::NotFound(_) => StatusCode::NOT_FOUND,
        PoolError::InvalidPool(_)
        | PoolError::UnknownItems(_)
        | PoolError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        PoolError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = ErrorResponse::new(error.code().to_string(), error.message());
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_not_found_maps_to_404() {
        let response = handle_pool_error(PoolError::not_found(ShareToken::generate()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_items_map_to_400() {
        let response = handle_pool_error(PoolError::unknown_items(vec![
            ItemId::new("ghost01").unwrap(),
        ]));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_pool_error(PoolError::infrastructure("db down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
