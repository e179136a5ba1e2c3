//! Ranking-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ShareToken};

use super::pair::ItemPair;

/// Failures raised by the ranking engine.
///
/// Every variant except `Conflict` and `Infrastructure` is a local
/// validation failure with no side effects; the engine never partially
/// applies a vote.
#[derive(Debug, Clone, PartialEq)]
pub enum RankingError {
    /// Resolved pool is too small or malformed.
    InvalidPool(String),
    /// Session was not found.
    NotFound(SessionId),
    /// No session carries the given share token.
    ShareTokenNotFound(ShareToken),
    /// Referenced custom pool does not exist.
    PoolNotFound(ShareToken),
    /// Caller does not own the session it tried to mutate.
    Forbidden,
    /// Vote submitted against a finished session.
    AlreadyComplete,
    /// No pending matchup could be derived; consistency guard.
    NoPendingMatchup,
    /// Claimed winner is not part of the pending matchup.
    InvalidWinner { expected: ItemPair },
    /// Optimistic concurrency retries exhausted; safe to resubmit.
    Conflict(String),
    /// Storage or other infrastructure fault.
    Infrastructure(String),
}

impl RankingError {
    pub fn invalid_pool(message: impl Into<String>) -> Self {
        RankingError::InvalidPool(message.into())
    }

    pub fn not_found(id: SessionId) -> Self {
        RankingError::NotFound(id)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        RankingError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RankingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RankingError::InvalidPool(_) => ErrorCode::InvalidPool,
            RankingError::NotFound(_) => ErrorCode::SessionNotFound,
            RankingError::ShareTokenNotFound(_) => ErrorCode::SessionNotFound,
            RankingError::PoolNotFound(_) => ErrorCode::PoolNotFound,
            RankingError::Forbidden => ErrorCode::Forbidden,
            RankingError::AlreadyComplete => ErrorCode::SessionComplete,
            RankingError::NoPendingMatchup => ErrorCode::NoPendingMatchup,
            RankingError::InvalidWinner { .. } => ErrorCode::InvalidWinner,
            RankingError::Conflict(_) => ErrorCode::Conflict,
            RankingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RankingError::InvalidPool(msg) => format!("Invalid pool: {}", msg),
            RankingError::NotFound(id) => format!("Ranking session not found: {}", id),
            RankingError::ShareTokenNotFound(token) => {
                format!("Shared ranking not found: {}", token)
            }
            RankingError::PoolNotFound(code) => format!("Custom pool not found: {}", code),
            RankingError::Forbidden => "Not authorized to modify this ranking".to_string(),
            RankingError::AlreadyComplete => "Ranking is already complete".to_string(),
            RankingError::NoPendingMatchup => "No pending matchup".to_string(),
            RankingError::InvalidWinner { expected } => {
                format!("Winner is not part of the pending matchup ({})", expected)
            }
            RankingError::Conflict(msg) => format!("Concurrent update conflict: {}", msg),
            RankingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RankingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RankingError {}

impl From<DomainError> for RankingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidPool | ErrorCode::ValidationFailed => {
                RankingError::InvalidPool(err.message)
            }
            ErrorCode::Forbidden | ErrorCode::Unauthorized => RankingError::Forbidden,
            ErrorCode::SessionComplete => RankingError::AlreadyComplete,
            ErrorCode::NoPendingMatchup => RankingError::NoPendingMatchup,
            ErrorCode::InvalidWinner => {
                // The aggregate names the expected pair in the error details.
                let expected = err
                    .details
                    .get("expected_a")
                    .zip(err.details.get("expected_b"))
                    .and_then(|(a, b)| {
                        let a = crate::domain::foundation::ItemId::new(a.clone()).ok()?;
                        let b = crate::domain::foundation::ItemId::new(b.clone()).ok()?;
                        ItemPair::new(a, b).ok()
                    });
                match expected {
                    Some(expected) => RankingError::InvalidWinner { expected },
                    None => RankingError::Infrastructure(err.to_string()),
                }
            }
            ErrorCode::Conflict => RankingError::Conflict(err.message),
            _ => RankingError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;

    #[test]
    fn codes_map_to_taxonomy() {
        assert_eq!(
            RankingError::invalid_pool("too small").code(),
            ErrorCode::InvalidPool
        );
        assert_eq!(
            RankingError::not_found(SessionId::new()).code(),
            ErrorCode::SessionNotFound
        );
        assert_eq!(RankingError::Forbidden.code(), ErrorCode::Forbidden);
        assert_eq!(RankingError::AlreadyComplete.code(), ErrorCode::SessionComplete);
        assert_eq!(RankingError::NoPendingMatchup.code(), ErrorCode::NoPendingMatchup);
    }

    #[test]
    fn invalid_winner_names_expected_pair() {
        let pair = ItemPair::new(
            ItemId::new("jordami01").unwrap(),
            ItemId::new("jamesle01").unwrap(),
        )
        .unwrap();
        let err = RankingError::InvalidWinner { expected: pair };
        assert!(err.message().contains("jordami01"));
        assert!(err.message().contains("jamesle01"));
    }

    #[test]
    fn domain_error_conversion_preserves_category() {
        let err: RankingError =
            DomainError::new(ErrorCode::Forbidden, "not the owner").into();
        assert_eq!(err, RankingError::Forbidden);
    }
}
