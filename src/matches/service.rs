use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::{MatchModel, Outcome},
    repository::MatchRepository,
    types::{MatchCreateRequest, MatchListQuery, MatchResponse, Pagination},
    validation::{validate_no_duplicate_players, validate_scores, validate_teams},
};
use crate::player::{models::PlayerModel, repository::PlayerRepository, types::PlayerResponse};
use crate::shared::AppError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Service for handling match business logic.
///
/// Holds the player repository as well, since match creation must verify
/// that every referenced player exists and responses resolve player ids to
/// full player records.
pub struct MatchService {
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl MatchService {
    pub fn new(
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    ) -> Self {
        Self {
            match_repository,
            player_repository,
        }
    }

    /// Records a new match. Validation runs in order: team structure and
    /// size, player existence, player uniqueness, score range. Any failure
    /// rejects the whole write.
    #[instrument(skip(self, request))]
    pub async fn create_match(
        &self,
        request: MatchCreateRequest,
    ) -> Result<MatchResponse, AppError> {
        validate_teams(&request.team_a, &request.team_b)?;

        let players = self
            .resolve_players(request.team_a.iter().chain(request.team_b.iter()))
            .await?;

        validate_no_duplicate_players(&request.team_a, &request.team_b)?;
        validate_scores(request.score_a, request.score_b)?;

        let match_model = MatchModel::new(
            request.date,
            request.team_a,
            request.team_b,
            request.score_a,
            request.score_b,
        );
        self.match_repository.create_match(&match_model).await?;

        info!(
            match_id = %match_model.id,
            score_a = match_model.score_a,
            score_b = match_model.score_b,
            outcome = %match_model.outcome(),
            "Match created successfully"
        );

        Ok(Self::to_response(match_model, &players))
    }

    /// Lists matches, most recent first, with pagination info
    #[instrument(skip(self))]
    pub async fn list_matches(
        &self,
        query: MatchListQuery,
    ) -> Result<(Vec<MatchResponse>, Pagination), AppError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let match_page = self
            .match_repository
            .list_matches(query.player.as_deref(), offset, limit)
            .await?;

        let players = self
            .resolve_known_players(match_page.matches.iter().flat_map(|m| m.player_ids()))
            .await?;

        let data: Vec<MatchResponse> = match_page
            .matches
            .into_iter()
            .map(|m| Self::to_response(m, &players))
            .collect();

        let pagination = Pagination {
            current: page,
            total: match_page.total.div_ceil(limit),
            count: data.len(),
            total_matches: match_page.total,
        };

        debug!(
            page = pagination.current,
            total_pages = pagination.total,
            total_matches = pagination.total_matches,
            "Matches listed successfully"
        );

        Ok((data, pagination))
    }

    /// Gets a single match by id, with teams resolved to player records
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &str) -> Result<MatchResponse, AppError> {
        Uuid::parse_str(match_id)
            .map_err(|_| AppError::Validation("Invalid match id".to_string()))?;

        let match_model = self
            .match_repository
            .get_match(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Match not found".to_string()))?;

        let players = self.resolve_known_players(match_model.player_ids()).await?;
        Ok(Self::to_response(match_model, &players))
    }

    /// Resolves every referenced id to a player record, failing on malformed
    /// ids and on ids that do not exist in the player store
    async fn resolve_players<'a>(
        &self,
        ids: impl Iterator<Item = &'a String>,
    ) -> Result<HashMap<String, PlayerModel>, AppError> {
        let mut players = HashMap::new();
        for id in ids {
            if players.contains_key(id) {
                continue;
            }
            Uuid::parse_str(id)
                .map_err(|_| AppError::Validation(format!("Invalid player id: {}", id)))?;

            match self.player_repository.get_player(id).await? {
                Some(player) => {
                    players.insert(id.clone(), player);
                }
                None => {
                    debug!(player_id = %id, "Match references a nonexistent player");
                    return Err(AppError::Referential(
                        "One or more players do not exist".to_string(),
                    ));
                }
            }
        }
        Ok(players)
    }

    /// Best-effort resolution for read paths: ids that no longer resolve are
    /// simply absent from the map
    async fn resolve_known_players<'a>(
        &self,
        ids: impl Iterator<Item = &'a String>,
    ) -> Result<HashMap<String, PlayerModel>, AppError> {
        let mut players = HashMap::new();
        for id in ids {
            if players.contains_key(id) {
                continue;
            }
            if let Some(player) = self.player_repository.get_player(id).await? {
                players.insert(id.clone(), player);
            }
        }
        Ok(players)
    }

    fn to_response(model: MatchModel, players: &HashMap<String, PlayerModel>) -> MatchResponse {
        let resolve_team = |ids: &[String]| -> Vec<PlayerResponse> {
            ids.iter()
                .filter_map(|id| players.get(id).cloned())
                .map(PlayerResponse::from)
                .collect()
        };

        let outcome: Outcome = model.outcome();
        MatchResponse {
            id: model.id,
            date: model.date,
            team_a: resolve_team(&model.team_a),
            team_b: resolve_team(&model.team_b),
            score_a: model.score_a,
            score_b: model.score_b,
            outcome,
        }
    }
}
