use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::Display;
use uuid::Uuid;

/// Derived winner/draw label from comparing the two final scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Outcome {
    #[serde(rename = "Team A")]
    #[strum(serialize = "Team A")]
    TeamA,
    #[serde(rename = "Team B")]
    #[strum(serialize = "Team B")]
    TeamB,
    #[serde(rename = "Draw")]
    #[strum(serialize = "Draw")]
    Draw,
}

/// Database model for the matches table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MatchModel {
    pub id: String, // UUID v4 as string
    pub date: DateTime<Utc>,
    pub team_a: Vec<String>, // Player ids, 1-2 entries
    pub team_b: Vec<String>, // Player ids, 1-2 entries
    pub score_a: i32,
    pub score_b: i32,
    pub created_at: DateTime<Utc>,
}

impl MatchModel {
    /// Creates a new match model with a generated ID.
    /// The match date defaults to the creation time when not supplied.
    pub fn new(
        date: Option<DateTime<Utc>>,
        team_a: Vec<String>,
        team_b: Vec<String>,
        score_a: i32,
        score_b: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            date: date.unwrap_or(now),
            team_a,
            team_b,
            score_a,
            score_b,
            created_at: now,
        }
    }

    /// Winner label derived from the final scores, never persisted
    pub fn outcome(&self) -> Outcome {
        if self.score_a > self.score_b {
            Outcome::TeamA
        } else if self.score_b > self.score_a {
            Outcome::TeamB
        } else {
            Outcome::Draw
        }
    }

    /// Whether the given player id appears on either team
    pub fn involves_player(&self, player_id: &str) -> bool {
        self.team_a.iter().any(|id| id == player_id)
            || self.team_b.iter().any(|id| id == player_id)
    }

    /// All player ids in the match, team A first
    pub fn player_ids(&self) -> impl Iterator<Item = &String> {
        self.team_a.iter().chain(self.team_b.iter())
    }
}
