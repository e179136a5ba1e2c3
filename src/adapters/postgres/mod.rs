//! PostgreSQL adapters.
//!
//! Ratings snapshots and pool lists are stored JSON-encoded in text
//! columns; the completed-pair set is never stored, only the append-only
//! vote table it derives from.

mod pool_store;
mod session_store;
mod vote_log;

pub use pool_store::PostgresCustomPoolStore;
pub use session_store::PostgresSessionStore;
pub use vote_log::PostgresVoteLog;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a low-level database failure into the domain error taxonomy.
pub(crate) fn db_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}
