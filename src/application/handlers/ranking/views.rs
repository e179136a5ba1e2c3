//! Read views assembled from engine state and the item catalog.
//!
//! The engine knows items only by id; everything display-worthy (names,
//! teams, stat profiles) comes from the catalog and is embedded unmodified.
//! Items the catalog does not know fall back to their raw id.

use serde::Serialize;

use crate::domain::foundation::{ItemId, SessionId, ShareToken};
use crate::domain::ranking::{ItemPair, RankingSession, StandingEntry};
use crate::ports::{ItemCatalog, ItemProfile};

/// One side of a matchup, enriched for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupSide {
    pub id: ItemId,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub stats: Option<ItemProfile>,
}

/// A matchup ready to present to a voter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupView {
    pub item_a: MatchupSide,
    pub item_b: MatchupSide,
}

/// One row of a materialized ranking, enriched for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntryView {
    pub rank: u32,
    pub item_id: ItemId,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub score: f64,
    pub wins: u32,
    pub losses: u32,
}

/// Full session state for GET queries and shared lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub pool_size: u32,
    pub is_complete: bool,
    pub votes_completed: u32,
    pub total_matchups: Option<u32>,
    pub current_rankings: Vec<RankingEntryView>,
    pub share_token: Option<ShareToken>,
}

fn side(catalog: &dyn ItemCatalog, id: &ItemId) -> MatchupSide {
    match catalog.card(id) {
        Some(card) => MatchupSide {
            id: card.id,
            name: card.name,
            team: card.team,
            position: card.position,
            stats: catalog.profile(id),
        },
        None => MatchupSide {
            id: id.clone(),
            name: id.as_str().to_string(),
            team: None,
            position: None,
            stats: None,
        },
    }
}

/// Builds the presentable form of a matchup.
pub(crate) fn matchup_view(catalog: &dyn ItemCatalog, pair: &ItemPair) -> MatchupView {
    MatchupView {
        item_a: side(catalog, pair.first()),
        item_b: side(catalog, pair.second()),
    }
}

/// Enriches materialized standings with catalog display data.
pub(crate) fn ranking_views(
    catalog: &dyn ItemCatalog,
    standings: &[StandingEntry],
) -> Vec<RankingEntryView> {
    standings
        .iter()
        .map(|entry| {
            let (name, team, position) = match catalog.card(&entry.item_id) {
                Some(card) => (card.name, card.team, card.position),
                None => (entry.item_id.as_str().to_string(), None, None),
            };
            RankingEntryView {
                rank: entry.rank,
                item_id: entry.item_id.clone(),
                name,
                team,
                position,
                score: entry.score,
                wins: entry.wins,
                losses: entry.losses,
            }
        })
        .collect()
}

/// Builds the full session view returned by GET queries.
pub(crate) fn session_view(catalog: &dyn ItemCatalog, session: &RankingSession) -> SessionView {
    SessionView {
        session_id: *session.id(),
        pool_size: session.pool_size().wire(),
        is_complete: session.is_complete(),
        votes_completed: session.votes_completed(),
        total_matchups: session.total_matchups(),
        current_rankings: ranking_views(catalog, &session.standings()),
        share_token: session.share_token().cloned(),
    }
}
