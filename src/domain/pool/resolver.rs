//! Item pool resolution.

use std::collections::HashSet;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId};

use super::size::PoolSize;

/// Resolves a pool specification into the item sequence a session will rank.
///
/// Source priority matches the API contract: a saved custom pool wins over
/// an explicit list, which wins over the head of the canonical ranked
/// catalog (the full catalog for unbounded sessions). The result is
/// deduplicated preserving first occurrence.
///
/// # Errors
///
/// - `InvalidPool` if fewer than 2 distinct items remain
pub fn resolve_pool(
    size: PoolSize,
    custom_items: Option<Vec<ItemId>>,
    explicit_items: Option<Vec<ItemId>>,
    catalog_ranked: &[ItemId],
) -> Result<Vec<ItemId>, DomainError> {
    let raw: Vec<ItemId> = if let Some(items) = custom_items {
        items
    } else if let Some(items) = explicit_items {
        items
    } else {
        let take = size.bound().unwrap_or(catalog_ranked.len());
        catalog_ranked.iter().take(take).cloned().collect()
    };

    let mut seen: HashSet<ItemId> = HashSet::with_capacity(raw.len());
    let mut pool: Vec<ItemId> = Vec::with_capacity(raw.len());
    for item in raw {
        if seen.insert(item.clone()) {
            pool.push(item);
        }
    }

    if pool.len() < 2 {
        return Err(DomainError::new(
            ErrorCode::InvalidPool,
            "need at least 2 items to rank",
        ));
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&str]) -> Vec<ItemId> {
        ids.iter().map(|id| ItemId::new(*id).unwrap()).collect()
    }

    #[test]
    fn bounded_size_takes_catalog_head() {
        let catalog = items(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]);
        let pool = resolve_pool(PoolSize::Ten, None, None, &catalog).unwrap();
        assert_eq!(pool.len(), 10);
        assert_eq!(pool[0].as_str(), "a");
        assert_eq!(pool[9].as_str(), "j");
    }

    #[test]
    fn unbounded_takes_full_catalog() {
        let catalog = items(&["a", "b", "c", "d"]);
        let pool = resolve_pool(PoolSize::Unbounded, None, None, &catalog).unwrap();
        assert_eq!(pool, catalog);
    }

    #[test]
    fn explicit_list_overrides_catalog() {
        let catalog = items(&["a", "b", "c"]);
        let explicit = items(&["x", "y"]);
        let pool = resolve_pool(PoolSize::Ten, None, Some(explicit.clone()), &catalog).unwrap();
        assert_eq!(pool, explicit);
    }

    #[test]
    fn custom_pool_overrides_explicit_list() {
        let catalog = items(&["a", "b"]);
        let custom = items(&["p", "q", "r"]);
        let explicit = items(&["x", "y"]);
        let pool =
            resolve_pool(PoolSize::Ten, Some(custom.clone()), Some(explicit), &catalog).unwrap();
        assert_eq!(pool, custom);
    }

    #[test]
    fn duplicates_are_removed_preserving_order() {
        let catalog = items(&[]);
        let explicit = items(&["x", "y", "x", "z", "y"]);
        let pool = resolve_pool(PoolSize::Ten, None, Some(explicit), &catalog).unwrap();
        assert_eq!(pool, items(&["x", "y", "z"]));
    }

    #[test]
    fn undersized_pool_is_rejected() {
        let catalog = items(&["a"]);
        let err = resolve_pool(PoolSize::Ten, None, None, &catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPool);
    }

    #[test]
    fn duplicate_only_list_is_rejected() {
        let catalog = items(&[]);
        let explicit = items(&["x", "x", "x"]);
        assert!(resolve_pool(PoolSize::Ten, None, Some(explicit), &catalog).is_err());
    }
}
