//! Custom pool aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, ItemId, OwnerToken, PoolId, ShareToken, Timestamp,
};

/// Minimum items in a custom pool.
pub const MIN_POOL_ITEMS: usize = 2;

/// Maximum items in a custom pool.
pub const MAX_POOL_ITEMS: usize = 200;

/// Maximum length for a custom pool name.
pub const MAX_POOL_NAME_LENGTH: usize = 100;

/// A named, shareable, user-defined subset of items to rank.
///
/// # Invariants
///
/// - `items` is deduplicated and holds 2-200 entries
/// - `name` is 1-100 characters, non-empty
/// - Immutable once created; independent lifecycle from sessions using it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPool {
    id: PoolId,
    owner: Option<OwnerToken>,
    name: String,
    description: Option<String>,
    items: Vec<ItemId>,
    share_code: ShareToken,
    is_public: bool,
    created_at: Timestamp,
}

impl CustomPool {
    /// Create a new custom pool.
    ///
    /// Items are deduplicated preserving first occurrence before the size
    /// bounds are checked.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is empty or too long
    /// - `InvalidPool` if fewer than 2 or more than 200 distinct items
    pub fn new(
        id: PoolId,
        owner: Option<OwnerToken>,
        name: String,
        description: Option<String>,
        items: Vec<ItemId>,
        is_public: bool,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        if items.len() > MAX_POOL_ITEMS {
            return Err(DomainError::new(
                ErrorCode::InvalidPool,
                format!("maximum {} items allowed", MAX_POOL_ITEMS),
            ));
        }

        let mut deduped: Vec<ItemId> = Vec::with_capacity(items.len());
        for item in items {
            if !deduped.contains(&item) {
                deduped.push(item);
            }
        }

        if deduped.len() < MIN_POOL_ITEMS {
            return Err(DomainError::new(
                ErrorCode::InvalidPool,
                format!("need at least {} distinct items", MIN_POOL_ITEMS),
            ));
        }

        Ok(Self {
            id,
            owner,
            name,
            description,
            items: deduped,
            share_code: ShareToken::generate(),
            is_public,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a custom pool from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PoolId,
        owner: Option<OwnerToken>,
        name: String,
        description: Option<String>,
        items: Vec<ItemId>,
        share_code: ShareToken,
        is_public: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            description,
            items,
            share_code,
            is_public,
            created_at,
        }
    }

    pub fn id(&self) -> &PoolId {
        &self.id
    }

    pub fn owner(&self) -> Option<&OwnerToken> {
        self.owner.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn share_code(&self) -> &ShareToken {
        &self.share_code
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Name cannot be empty"));
        }
        if trimmed.len() > MAX_POOL_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Name must be {} characters or less", MAX_POOL_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&str]) -> Vec<ItemId> {
        ids.iter().map(|id| ItemId::new(*id).unwrap()).collect()
    }

    fn test_pool(ids: &[&str]) -> Result<CustomPool, DomainError> {
        CustomPool::new(
            PoolId::new(),
            None,
            "Top Guards".to_string(),
            None,
            items(ids),
            false,
        )
    }

    #[test]
    fn new_pool_gets_share_code() {
        let pool = test_pool(&["a", "b", "c"]).unwrap();
        assert!(!pool.share_code().as_str().is_empty());
    }

    #[test]
    fn new_pool_dedupes_items() {
        let pool = test_pool(&["a", "b", "a", "c", "b"]).unwrap();
        assert_eq!(pool.items(), &items(&["a", "b", "c"])[..]);
    }

    #[test]
    fn pool_rejects_single_item() {
        assert!(test_pool(&["a"]).is_err());
    }

    #[test]
    fn pool_rejects_duplicate_only_list() {
        assert!(test_pool(&["a", "a", "a"]).is_err());
    }

    #[test]
    fn pool_rejects_oversized_list() {
        let ids: Vec<String> = (0..201).map(|i| format!("item{}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
        assert!(test_pool(&refs).is_err());
    }

    #[test]
    fn pool_rejects_empty_name() {
        let result = CustomPool::new(
            PoolId::new(),
            None,
            "   ".to_string(),
            None,
            items(&["a", "b"]),
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn pool_rejects_too_long_name() {
        let result = CustomPool::new(
            PoolId::new(),
            None,
            "x".repeat(MAX_POOL_NAME_LENGTH + 1),
            None,
            items(&["a", "b"]),
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn share_codes_are_unique_per_pool() {
        let p1 = test_pool(&["a", "b"]).unwrap();
        let p2 = test_pool(&["a", "b"]).unwrap();
        assert_ne!(p1.share_code(), p2.share_code());
    }
}
