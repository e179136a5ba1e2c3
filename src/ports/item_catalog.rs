//! Item catalog port.
//!
//! The catalog is the external collaborator that knows what an item
//! actually is: display name, team, position, and precomputed career-stat
//! ranks. The engine embeds what the catalog returns without modification
//! and performs no statistics of its own.
//!
//! Catalogs are read-only for the process lifetime; implementations are
//! built once at startup and injected by reference.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ItemId;

/// Display card for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCard {
    pub id: ItemId,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
}

/// One career stat with its precomputed all-time rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatWithRank {
    pub value: f64,
    /// All-time rank in this category (1 = best).
    pub rank: u32,
    /// Percentile, 0-100, higher is better.
    pub percentile: f64,
}

/// Precomputed career-stat profile for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProfile {
    pub games: StatWithRank,
    pub points: StatWithRank,
    pub win_shares: StatWithRank,
    pub career_from: String,
    pub career_to: String,
}

/// Read-only catalog of rankable items.
pub trait ItemCatalog: Send + Sync {
    /// Item ids in canonical ranked order (best first).
    fn ranked_ids(&self) -> &[ItemId];

    /// Whether the catalog knows this item.
    fn contains(&self, id: &ItemId) -> bool;

    /// Display card for an item, if known.
    fn card(&self, id: &ItemId) -> Option<ItemCard>;

    /// Career-stat profile for an item, if known.
    fn profile(&self, id: &ItemId) -> Option<ItemProfile>;

    /// Number of items in the catalog.
    fn len(&self) -> usize;

    /// Whether the catalog is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn item_catalog_is_object_safe() {
        fn _accepts_dyn(_catalog: &dyn ItemCatalog) {}
    }

    #[test]
    fn item_card_serializes() {
        let card = ItemCard {
            id: ItemId::new("jordami01").unwrap(),
            name: "Michael Jordan".to_string(),
            team: Some("CHI".to_string()),
            position: Some("SG".to_string()),
        };
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("jordami01"));
        assert!(json.contains("Michael Jordan"));
    }
}
