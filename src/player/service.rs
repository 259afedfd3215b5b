use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::PlayerModel,
    repository::{PlayerFilter, PlayerRepository},
    types::{PlayerCreateRequest, PlayerListQuery, PlayerResponse},
    validation::validate_new_player,
};
use crate::shared::AppError;

/// Service for handling player business logic
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Creates a new player after trimming, validating and normalizing the
    /// input, and rejecting case-insensitive duplicates of the
    /// (first, last, company) triple.
    #[instrument(skip(self))]
    pub async fn create_player(
        &self,
        request: PlayerCreateRequest,
    ) -> Result<PlayerResponse, AppError> {
        let new_player =
            validate_new_player(&request.first_name, &request.last_name, &request.company)?;

        let existing = self
            .repository
            .find_by_triple(
                &new_player.first_name,
                &new_player.last_name,
                &new_player.company,
            )
            .await?;
        if existing.is_some() {
            debug!(
                first_name = %new_player.first_name,
                last_name = %new_player.last_name,
                "Player triple already exists"
            );
            return Err(AppError::Duplicate("Player already exists".to_string()));
        }

        let player_model = PlayerModel::new(
            new_player.first_name,
            new_player.last_name,
            new_player.company,
        );
        self.repository.create_player(&player_model).await?;

        info!(
            player_id = %player_model.id,
            full_name = %player_model.full_name(),
            "Player created successfully"
        );

        Ok(player_model.into())
    }

    /// Lists players with optional search/company filters
    #[instrument(skip(self))]
    pub async fn list_players(
        &self,
        query: PlayerListQuery,
    ) -> Result<Vec<PlayerResponse>, AppError> {
        let filter = PlayerFilter {
            search: query.search,
            company: query.company,
        };

        let players = self.repository.list_players(&filter).await?;

        debug!(count = players.len(), "Players retrieved successfully");
        Ok(players.into_iter().map(PlayerResponse::from).collect())
    }

    /// Gets a single player by id
    #[instrument(skip(self))]
    pub async fn get_player(&self, player_id: &str) -> Result<PlayerResponse, AppError> {
        Uuid::parse_str(player_id)
            .map_err(|_| AppError::Validation("Invalid player id".to_string()))?;

        let player = self
            .repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        Ok(player.into())
    }
}
