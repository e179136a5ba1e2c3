//! HTTP adapter for custom pool endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::PoolHandlers;
pub use routes::pool_routes;
