use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the players table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: String, // UUID v4 as string
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
}

impl PlayerModel {
    /// Creates a new player model with a generated ID.
    /// Inputs are expected to be already trimmed and normalized.
    pub fn new(first_name: String, last_name: String, company: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name,
            last_name,
            company,
            created_at: Utc::now(),
        }
    }

    /// Full display name, derived on read and never persisted
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive comparison against the identifying
    /// (first name, last name, company) triple
    pub fn matches_triple(&self, first: &str, last: &str, company: &str) -> bool {
        self.first_name.to_lowercase() == first.to_lowercase()
            && self.last_name.to_lowercase() == last.to_lowercase()
            && self.company.to_lowercase() == company.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_model() {
        let player = PlayerModel::new(
            "Marco".to_string(),
            "Rossi".to_string(),
            "TechCorp".to_string(),
        );

        assert!(!player.id.is_empty());
        assert_eq!(player.full_name(), "Marco Rossi");
        assert_eq!(player.company, "TechCorp");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PlayerModel::new("A".to_string(), "B".to_string(), "C".to_string());
        let b = PlayerModel::new("A".to_string(), "B".to_string(), "C".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_matches_triple_is_case_insensitive() {
        let player = PlayerModel::new(
            "Marco".to_string(),
            "Rossi".to_string(),
            "TechCorp".to_string(),
        );

        assert!(player.matches_triple("marco", "ROSSI", "techcorp"));
        assert!(player.matches_triple("Marco", "Rossi", "TechCorp"));
        assert!(!player.matches_triple("Marco", "Rossi", "DesignStudio"));
        assert!(!player.matches_triple("Luca", "Rossi", "TechCorp"));
    }
}
