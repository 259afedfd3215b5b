use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::Outcome;
use crate::player::types::PlayerResponse;

/// Request payload for recording a new match
#[derive(Debug, Deserialize)]
pub struct MatchCreateRequest {
    pub date: Option<DateTime<Utc>>,
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    pub score_a: i32,
    pub score_b: i32,
}

/// Query parameters for listing matches
#[derive(Debug, Default, Deserialize)]
pub struct MatchListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Restrict to matches this player took part in
    pub player: Option<String>,
}

/// Match record as exposed over the API, with teams resolved to full player
/// data and the derived outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub id: String,
    pub date: DateTime<Utc>,
    pub team_a: Vec<PlayerResponse>,
    pub team_b: Vec<PlayerResponse>,
    pub score_a: i32,
    pub score_b: i32,
    pub outcome: Outcome,
}

/// Pagination info reported alongside a match listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based
    pub current: u64,
    /// Total number of pages
    pub total: u64,
    /// Number of items on this page
    pub count: usize,
    /// Total number of matching records
    pub total_matches: u64,
}

/// Envelope for the match listing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub success: bool,
    pub data: Vec<MatchResponse>,
    pub pagination: Pagination,
}
