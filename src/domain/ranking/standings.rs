//! Ranking materialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ItemId;

use super::rating::Rating;

/// One row of a materialized ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    /// 1-based position.
    pub rank: u32,
    pub item_id: ItemId,
    /// Score rounded to one decimal place for display.
    pub score: f64,
    pub wins: u32,
    pub losses: u32,
}

/// Converts a ratings map into an ordered, tie-broken standings list.
///
/// Descending by score; equal scores keep original pool order (stable sort),
/// so the output is deterministic for a given state and identical across
/// repeated calls. Read-only and valid at any point mid-ranking.
pub fn materialize(pool: &[ItemId], ratings: &HashMap<ItemId, Rating>) -> Vec<StandingEntry> {
    let mut rows: Vec<(&ItemId, &Rating)> = pool
        .iter()
        .filter_map(|item| ratings.get(item).map(|rating| (item, rating)))
        .collect();

    rows.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    rows.into_iter()
        .enumerate()
        .map(|(idx, (item, rating))| StandingEntry {
            rank: idx as u32 + 1,
            item_id: item.clone(),
            score: (rating.score * 10.0).round() / 10.0,
            wins: rating.wins,
            losses: rating.losses,
        })
        .collect()
}
