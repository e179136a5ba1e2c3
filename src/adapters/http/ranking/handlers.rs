//! HTTP handlers for ranking session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequesterIdentity;
use crate::adapters::http::ErrorResponse;
use crate::application::handlers::ranking::{
    FinalizeSessionCommand, FinalizeSessionHandler, GetSessionHandler, GetSessionQuery,
    GetSharedSessionHandler, GetSharedSessionQuery, StartSessionCommand, StartSessionHandler,
    SubmitVoteCommand, SubmitVoteHandler,
};
use crate::config::SharingConfig;
use crate::domain::foundation::{ItemId, SessionId, ShareToken};
use crate::domain::pool::PoolSize;
use crate::domain::ranking::RankingError;

use super::dto::{
    FinalizeRequest, FinalizeResponse, SessionResponse, StartSessionRequest,
    StartSessionResponse, VoteRequest, VoteResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RankingHandlers {
    start_handler: Arc<StartSessionHandler>,
    vote_handler: Arc<SubmitVoteHandler>,
    get_handler: Arc<GetSessionHandler>,
    finalize_handler: Arc<FinalizeSessionHandler>,
    shared_handler: Arc<GetSharedSessionHandler>,
    sharing: SharingConfig,
}

impl RankingHandlers {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        vote_handler: Arc<SubmitVoteHandler>,
        get_handler: Arc<GetSessionHandler>,
        finalize_handler: Arc<FinalizeSessionHandler>,
        shared_handler: Arc<GetSharedSessionHandler>,
        sharing: SharingConfig,
    ) -> Self {
        Self {
            start_handler,
            vote_handler,
            get_handler,
            finalize_handler,
            shared_handler,
            sharing,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/rankings/start - Start a ranking session
pub async fn start_session(
    State(handlers): State<RankingHandlers>,
    RequesterIdentity(owner): RequesterIdentity,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    let pool_size = match PoolSize::from_wire(req.pool_size) {
        Ok(size) => size,
        Err(e) => return handle_ranking_error(RankingError::from(e)),
    };

    let explicit_items = match req.items.map(parse_item_ids).transpose() {
        Ok(items) => items,
        Err(response) => return response,
    };

    let custom_pool_code = match req.custom_pool_code.map(ShareToken::new).transpose() {
        Ok(code) => code,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid custom pool code")),
            )
                .into_response()
        }
    };

    let cmd = StartSessionCommand {
        owner,
        pool_size,
        explicit_items,
        custom_pool_code,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response = StartSessionResponse {
                session_id: result.session.id().to_string(),
                pool_size: result.session.pool_size().wire(),
                total_matchups: result.session.total_matchups(),
                first_matchup: result.first_matchup.into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_ranking_error(e),
    }
}

/// PUT /api/rankings/:id/vote - Submit a matchup vote
pub async fn submit_vote(
    State(handlers): State<RankingHandlers>,
    RequesterIdentity(caller): RequesterIdentity,
    Path(session_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let winner = match ItemId::new(req.winner_id) {
        Ok(winner) => winner,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid winner id")),
            )
                .into_response()
        }
    };

    let cmd = SubmitVoteCommand {
        session_id,
        winner,
        caller,
    };

    match handlers.vote_handler.handle(cmd).await {
        Ok(result) => {
            let response = VoteResponse {
                votes_completed: result.votes_completed,
                total_matchups: result.total_matchups,
                current_rankings: result
                    .current_rankings
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                next_matchup: result.next_matchup.map(Into::into),
                is_complete: result.is_complete,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_ranking_error(e),
    }
}

/// GET /api/rankings/:id - Current session state
pub async fn get_session(
    State(handlers): State<RankingHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_ranking_error(e),
    }
}

/// POST /api/rankings/:id/complete - Finalize a session
pub async fn finalize_session(
    State(handlers): State<RankingHandlers>,
    RequesterIdentity(caller): RequesterIdentity,
    Path(session_id): Path<String>,
    req: Option<Json<FinalizeRequest>>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let Json(req) = req.unwrap_or_default();

    let cmd = FinalizeSessionCommand {
        session_id,
        caller,
        request_share: req.generate_share_link,
    };

    match handlers.finalize_handler.handle(cmd).await {
        Ok(result) => {
            let share_url = result
                .share_token
                .as_ref()
                .map(|token| handlers.sharing.share_url(token.as_str()));
            let response = FinalizeResponse {
                final_rankings: result
                    .final_rankings
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                share_token: result.share_token.map(|t| t.to_string()),
                share_url,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_ranking_error(e),
    }
}

/// GET /api/rankings/share/:token - Public shared lookup
pub async fn get_shared_session(
    State(handlers): State<RankingHandlers>,
    Path(token): Path<String>,
) -> Response {
    let share_token = match ShareToken::new(token) {
        Ok(token) => token,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid share token")),
            )
                .into_response()
        }
    };

    match handlers
        .shared_handler
        .handle(GetSharedSessionQuery { share_token })
        .await
    {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_ranking_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn parse_item_ids(raw: Vec<String>) -> Result<Vec<ItemId>, Response> {
    raw.into_iter()
        .map(ItemId::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Item ids must be non-empty")),
            )
                .into_response()
        })
}

fn handle_ranking_error(error: RankingError) -> Response {
    let status = match &error {
        RankingError::InvalidPool(_)
        | RankingError::AlreadyComplete
        | RankingError::NoPendingMatchup
        | RankingError::InvalidWinner { .. } => StatusCode::BAD_REQUEST,
        RankingError::NotFound(_)
        | RankingError::ShareTokenNotFound(_)
        | RankingError::PoolNotFound(_) => StatusCode::NOT_FOUND,
        RankingError::Forbidden => StatusCode::FORBIDDEN,
        RankingError::Conflict(_) => StatusCode::CONFLICT,
        RankingError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = ErrorResponse::new(error.code().to_string(), error.message());
    (status, Json(body)).into_response()
}
