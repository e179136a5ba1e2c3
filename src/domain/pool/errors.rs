//! Custom-pool-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, ShareToken};

/// Failures raised by custom pool operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolError {
    /// No pool carries the given share code.
    NotFound(ShareToken),
    /// Pool is too small, too large, or malformed.
    InvalidPool(String),
    /// Item ids the catalog does not recognize.
    UnknownItems(Vec<ItemId>),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl PoolError {
    pub fn not_found(code: ShareToken) -> Self {
        PoolError::NotFound(code)
    }

    pub fn invalid_pool(message: impl Into<String>) -> Self {
        PoolError::InvalidPool(message.into())
    }

    pub fn unknown_items(items: Vec<ItemId>) -> Self {
        PoolError::UnknownItems(items)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PoolError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PoolError::NotFound(_) => ErrorCode::PoolNotFound,
            PoolError::InvalidPool(_) => ErrorCode::InvalidPool,
            PoolError::UnknownItems(_) => ErrorCode::ItemNotFound,
            PoolError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PoolError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PoolError::NotFound(code) => format!("Custom pool not found: {}", code),
            PoolError::InvalidPool(msg) => format!("Invalid pool: {}", msg),
            PoolError::UnknownItems(items) => {
                let sample: Vec<&str> = items.iter().take(5).map(|i| i.as_str()).collect();
                format!("Unknown item ids: {}", sample.join(", "))
            }
            PoolError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PoolError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PoolError {}

impl From<DomainError> for PoolError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidPool => PoolError::InvalidPool(err.message),
            ErrorCode::ValidationFailed => PoolError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => PoolError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_items_message_samples_first_five() {
        let items: Vec<ItemId> = (0..8)
            .map(|i| ItemId::new(format!("item{}", i)).unwrap())
            .collect();
        let err = PoolError::unknown_items(items);
        let msg = err.message();
        assert!(msg.contains("item0"));
        assert!(msg.contains("item4"));
        assert!(!msg.contains("item5"));
    }

    #[test]
    fn validation_conversion_extracts_field() {
        let err: PoolError = DomainError::validation("name", "Name cannot be empty").into();
        match err {
            PoolError::ValidationFailed { field, .. } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn codes_map_to_taxonomy() {
        assert_eq!(
            PoolError::not_found(ShareToken::generate()).code(),
            ErrorCode::PoolNotFound
        );
        assert_eq!(
            PoolError::invalid_pool("too small").code(),
            ErrorCode::InvalidPool
        );
    }
}
