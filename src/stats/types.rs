use serde::{Deserialize, Serialize};

use crate::player::types::PlayerResponse;

/// The player appearing in the most matches, with the appearance count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPlayer {
    pub player: PlayerResponse,
    pub matches_played: u64,
}

/// Aggregate statistics over the whole data set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total_matches: u64,
    pub total_players: u64,
    /// None when no matches have been recorded yet
    pub top_player: Option<TopPlayer>,
}
