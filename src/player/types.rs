use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::PlayerModel;

/// Request payload for creating a new player
#[derive(Debug, Deserialize)]
pub struct PlayerCreateRequest {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

/// Query parameters for listing players
#[derive(Debug, Default, Deserialize)]
pub struct PlayerListQuery {
    pub search: Option<String>,
    pub company: Option<String>,
}

/// Player record as exposed over the API, including the derived full name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<PlayerModel> for PlayerResponse {
    fn from(model: PlayerModel) -> Self {
        let full_name = model.full_name();
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            company: model.company,
            full_name,
            created_at: model.created_at,
        }
    }
}

/// Envelope for the player listing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerListResponse {
    pub success: bool,
    pub data: Vec<PlayerResponse>,
    pub count: usize,
}
