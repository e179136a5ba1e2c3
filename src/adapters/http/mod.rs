//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod middleware;
pub mod pool;
pub mod ranking;

use axum::routing::get;
use axum::Router;
use serde::Serialize;

pub use pool::PoolHandlers;
pub use ranking::RankingHandlers;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

/// Assembles the full API router.
pub fn api_router(ranking: RankingHandlers, pools: PoolHandlers) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/rankings/pools", pool::pool_routes(pools))
        .nest("/api/rankings", ranking::ranking_routes(ranking))
}

/// GET /health - liveness probe
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_serializes_code_and_message() {
        let error = ErrorResponse::bad_request("Invalid session ID");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("BAD_REQUEST"));
        assert!(json.contains("Invalid session ID"));
    }
}
