//! Matchup selection.
//!
//! Greedy nearest-score scan: among all pairs not yet compared, pick the
//! most evenly matched one. The scan is O(n²) per call, which is fine at
//! human voting pace.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::ItemId;

use super::pair::ItemPair;
use super::rating::{Rating, INITIAL_SCORE};

/// Picks the next matchup to present, or `None` when the ranking is done.
///
/// Enumeration runs in pool order (i < j), and ties on score difference keep
/// the first pair encountered, so the result is deterministic for a given
/// state. Bounded sessions (`total_matchups = Some(..)`) are exhausted once
/// every pair has been compared; an unbounded session keeps serving pairs
/// for as long as any remain uncompared, so in practice only explicit
/// finalization ends it.
pub fn next_matchup(
    pool: &[ItemId],
    ratings: &HashMap<ItemId, Rating>,
    completed_pairs: &HashSet<ItemPair>,
    total_matchups: Option<u32>,
) -> Option<ItemPair> {
    if let Some(total) = total_matchups {
        if completed_pairs.len() >= total as usize {
            return None;
        }
    }

    let score_of = |item: &ItemId| {
        ratings
            .get(item)
            .map(|r| r.score)
            .unwrap_or(INITIAL_SCORE)
    };

    let mut best_pair: Option<ItemPair> = None;
    let mut best_diff = f64::INFINITY;

    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            let Ok(pair) = ItemPair::new(pool[i].clone(), pool[j].clone()) else {
                continue;
            };
            if completed_pairs.contains(&pair) {
                continue;
            }

            let diff = (score_of(&pool[i]) - score_of(&pool[j])).abs();
            if diff < best_diff {
                best_diff = diff;
                best_pair = Some(pair);
            }
        }
    }

    best_pair
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    fn pool(ids: &[&str]) -> Vec<ItemId> {
        ids.iter().map(|id| item(id)).collect()
    }

    fn ratings_with_scores(entries: &[(&str, f64)]) -> HashMap<ItemId, Rating> {
        entries
            .iter()
            .map(|(id, score)| {
                (
                    item(id),
                    Rating {
                        score: *score,
                        wins: 0,
                        losses: 0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn fresh_pool_yields_first_enumerated_pair() {
        let pool = pool(&["a", "b", "c"]);
        let ratings = ratings_with_scores(&[("a", 1500.0), ("b", 1500.0), ("c", 1500.0)]);
        let completed = HashSet::new();

        let pair = next_matchup(&pool, &ratings, &completed, Some(3)).unwrap();
        assert_eq!(pair, ItemPair::new(item("a"), item("b")).unwrap());
    }

    #[test]
    fn closest_scores_win() {
        let pool = pool(&["a", "b", "c"]);
        let ratings = ratings_with_scores(&[("a", 1600.0), ("b", 1400.0), ("c", 1590.0)]);
        let completed = HashSet::new();

        let pair = next_matchup(&pool, &ratings, &completed, Some(3)).unwrap();
        assert_eq!(pair, ItemPair::new(item("a"), item("c")).unwrap());
    }

    #[test]
    fn completed_pairs_are_skipped() {
        let pool = pool(&["a", "b", "c"]);
        let ratings = ratings_with_scores(&[("a", 1500.0), ("b", 1500.0), ("c", 1500.0)]);
        let mut completed = HashSet::new();
        completed.insert(ItemPair::new(item("a"), item("b")).unwrap());

        let pair = next_matchup(&pool, &ratings, &completed, Some(3)).unwrap();
        assert_eq!(pair, ItemPair::new(item("a"), item("c")).unwrap());
    }

    #[test]
    fn bounded_exhaustion_returns_none() {
        let pool = pool(&["a", "b"]);
        let ratings = ratings_with_scores(&[("a", 1516.0), ("b", 1484.0)]);
        let mut completed = HashSet::new();
        completed.insert(ItemPair::new(item("a"), item("b")).unwrap());

        assert_eq!(next_matchup(&pool, &ratings, &completed, Some(1)), None);
    }

    #[test]
    fn unbounded_pool_ignores_matchup_count() {
        let pool = pool(&["a", "b", "c"]);
        let ratings = ratings_with_scores(&[("a", 1516.0), ("b", 1484.0), ("c", 1500.0)]);
        let mut completed = HashSet::new();
        completed.insert(ItemPair::new(item("a"), item("b")).unwrap());
        completed.insert(ItemPair::new(item("a"), item("c")).unwrap());

        // A bounded pool of 3 would stop at 3 matchups; unbounded keeps
        // serving uncompared pairs for as long as any remain.
        assert!(next_matchup(&pool, &ratings, &completed, None).is_some());
    }

    #[test]
    fn selection_is_deterministic() {
        let pool = pool(&["a", "b", "c", "d"]);
        let ratings = ratings_with_scores(&[
            ("a", 1516.0),
            ("b", 1484.0),
            ("c", 1500.0),
            ("d", 1500.0),
        ]);
        let completed = HashSet::new();

        let first = next_matchup(&pool, &ratings, &completed, Some(6));
        let second = next_matchup(&pool, &ratings, &completed, Some(6));
        assert_eq!(first, second);
    }

    #[test]
    fn tie_on_gap_keeps_enumeration_order() {
        // |1516 - 1500| == |1484 - 1500|: the a-c pair is enumerated first.
        let pool = pool(&["a", "b", "c"]);
        let ratings = ratings_with_scores(&[("a", 1516.0), ("b", 1484.0), ("c", 1500.0)]);
        let mut completed = HashSet::new();
        completed.insert(ItemPair::new(item("a"), item("b")).unwrap());

        let pair = next_matchup(&pool, &ratings, &completed, Some(3)).unwrap();
        assert_eq!(pair, ItemPair::new(item("a"), item("c")).unwrap());
    }
}
