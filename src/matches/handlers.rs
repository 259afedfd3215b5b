use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::MatchService,
    types::{MatchCreateRequest, MatchListQuery, MatchListResponse, MatchResponse},
};
use crate::shared::{ApiResponse, AppError, AppState};

/// HTTP handler for listing matches
///
/// GET /api/matches?page=&limit=&player=
/// Returns matches most recent first, with pagination info
#[instrument(name = "list_matches", skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<MatchListResponse>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        Arc::clone(&state.player_repository),
    );
    let (matches, pagination) = service.list_matches(query).await?;

    info!(
        count = matches.len(),
        total = pagination.total_matches,
        "Matches listed successfully"
    );

    Ok(Json(MatchListResponse {
        success: true,
        data: matches,
        pagination,
    }))
}

/// HTTP handler for recording a new match
///
/// POST /api/matches
/// Returns the created match with teams resolved to full player data
#[instrument(name = "create_match", skip(state, request))]
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<MatchCreateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MatchResponse>>), AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        Arc::clone(&state.player_repository),
    );
    let created = service.create_match(request).await?;

    info!(
        match_id = %created.id,
        outcome = %created.outcome,
        "Match created successfully"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Match created successfully", created)),
    ))
}

/// HTTP handler for fetching a single match
///
/// GET /api/matches/:id
#[instrument(name = "get_match", skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<ApiResponse<MatchResponse>>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        Arc::clone(&state.player_repository),
    );
    let found = service.get_match(&match_id).await?;

    Ok(Json(ApiResponse::data(found)))
}
