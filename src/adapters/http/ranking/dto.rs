//! HTTP DTOs for ranking session endpoints.
//!
//! These types decouple the HTTP API from application views, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ranking::{
    MatchupSide, MatchupView, RankingEntryView, SessionView,
};
use crate::ports::ItemProfile;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a ranking session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    /// 10, 50, 100, or 0 for an unbounded session.
    pub pool_size: u32,
    /// Explicit item ids to rank instead of the catalog head.
    #[serde(default)]
    pub items: Option<Vec<String>>,
    /// Share code of a saved custom pool to rank.
    #[serde(default)]
    pub custom_pool_code: Option<String>,
}

/// Request to submit one vote.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub winner_id: String,
}

/// Request to finalize a session.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeRequest {
    #[serde(default = "default_true")]
    pub generate_share_link: bool,
}

impl Default for FinalizeRequest {
    fn default() -> Self {
        Self {
            generate_share_link: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One side of a matchup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupSideDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ItemProfile>,
}

impl From<MatchupSide> for MatchupSideDto {
    fn from(side: MatchupSide) -> Self {
        Self {
            id: side.id.to_string(),
            name: side.name,
            team: side.team,
            position: side.position,
            stats: side.stats,
        }
    }
}

/// A matchup presented for comparison.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupDto {
    pub item_a: MatchupSideDto,
    pub item_b: MatchupSideDto,
}

impl From<MatchupView> for MatchupDto {
    fn from(view: MatchupView) -> Self {
        Self {
            item_a: view.item_a.into(),
            item_b: view.item_b.into(),
        }
    }
}

/// One row of a materialized ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankingEntryDto {
    pub rank: u32,
    pub item_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub score: f64,
    pub wins: u32,
    pub losses: u32,
}

impl From<RankingEntryView> for RankingEntryDto {
    fn from(view: RankingEntryView) -> Self {
        Self {
            rank: view.rank,
            item_id: view.item_id.to_string(),
            name: view.name,
            team: view.team,
            position: view.position,
            score: view.score,
            wins: view.wins,
            losses: view.losses,
        }
    }
}

/// Response to a successful session start.
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub pool_size: u32,
    pub total_matchups: Option<u32>,
    pub first_matchup: MatchupDto,
}

/// Response to an accepted vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub votes_completed: u32,
    pub total_matchups: Option<u32>,
    pub current_rankings: Vec<RankingEntryDto>,
    pub next_matchup: Option<MatchupDto>,
    pub is_complete: bool,
}

/// Full session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub pool_size: u32,
    pub is_complete: bool,
    pub votes_completed: u32,
    pub total_matchups: Option<u32>,
    pub current_rankings: Vec<RankingEntryDto>,
    pub share_token: Option<String>,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            pool_size: view.pool_size,
            is_complete: view.is_complete,
            votes_completed: view.votes_completed,
            total_matchups: view.total_matchups,
            current_rankings: view.current_rankings.into_iter().map(Into::into).collect(),
            share_token: view.share_token.map(|t| t.to_string()),
        }
    }
}

/// Response to finalization.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizeResponse {
    pub final_rankings: Vec<RankingEntryDto>,
    pub share_token: Option<String>,
    pub share_url: Option<String>,
}
