use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{service::StatsService, types::SummaryResponse};
use crate::shared::{ApiResponse, AppError, AppState};

/// HTTP handler for the aggregate statistics summary
///
/// GET /api/matches/stats/summary
#[instrument(name = "get_summary", skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SummaryResponse>>, AppError> {
    let service = StatsService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.match_repository),
    );
    let summary = service.summary().await?;

    info!(
        total_matches = summary.total_matches,
        total_players = summary.total_players,
        "Summary retrieved successfully"
    );

    Ok(Json(ApiResponse::data(summary)))
}
