//! Unordered item pair value object.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::{ItemId, ValidationError};

/// An unordered pair of distinct items presented for comparison.
///
/// Stored in canonical order (lexicographically smaller id first) so that
/// `{A, B}` and `{B, A}` compare and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ItemPair {
    first: ItemId,
    second: ItemId,
}

impl ItemPair {
    /// Creates a pair from two distinct items, normalizing order.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if both sides are the same item
    pub fn new(a: ItemId, b: ItemId) -> Result<Self, ValidationError> {
        if a == b {
            return Err(ValidationError::invalid_format(
                "item_pair",
                "a matchup requires two distinct items",
            ));
        }
        if a <= b {
            Ok(Self { first: a, second: b })
        } else {
            Ok(Self { first: b, second: a })
        }
    }

    /// The lexicographically smaller item.
    pub fn first(&self) -> &ItemId {
        &self.first
    }

    /// The lexicographically larger item.
    pub fn second(&self) -> &ItemId {
        &self.second
    }

    /// Checks whether the given item is one of the two sides.
    pub fn contains(&self, item: &ItemId) -> bool {
        &self.first == item || &self.second == item
    }

    /// Returns the other side of the pair, or `None` if `item` is not in it.
    pub fn other(&self, item: &ItemId) -> Option<&ItemId> {
        if &self.first == item {
            Some(&self.second)
        } else if &self.second == item {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for ItemPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    #[test]
    fn pair_normalizes_order() {
        let p1 = ItemPair::new(item("b"), item("a")).unwrap();
        let p2 = ItemPair::new(item("a"), item("b")).unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.first().as_str(), "a");
        assert_eq!(p1.second().as_str(), "b");
    }

    #[test]
    fn pair_rejects_identical_items() {
        assert!(ItemPair::new(item("a"), item("a")).is_err());
    }

    #[test]
    fn pair_contains_both_sides() {
        let p = ItemPair::new(item("a"), item("b")).unwrap();
        assert!(p.contains(&item("a")));
        assert!(p.contains(&item("b")));
        assert!(!p.contains(&item("c")));
    }

    #[test]
    fn pair_other_returns_opposite_side() {
        let p = ItemPair::new(item("a"), item("b")).unwrap();
        assert_eq!(p.other(&item("a")), Some(&item("b")));
        assert_eq!(p.other(&item("b")), Some(&item("a")));
        assert_eq!(p.other(&item("c")), None);
    }

    #[test]
    fn normalized_pairs_hash_identically() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ItemPair::new(item("x"), item("y")).unwrap());
        assert!(set.contains(&ItemPair::new(item("y"), item("x")).unwrap()));
    }
}
