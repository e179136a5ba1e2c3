//! HTTP adapter for ranking session endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::RankingHandlers;
pub use routes::ranking_routes;
