// Library crate for the Lodstats match-tracking server
// This file exposes the public API for integration tests

pub mod matches;
pub mod player;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use shared::{AppError, AppState};

use axum::{routing::get, Json, Router};
use serde_json::json;

/// Builds the API router shared by the server binary and the test suite
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/players",
            get(player::list_players).post(player::create_player),
        )
        .route("/api/players/:id", get(player::get_player))
        .route(
            "/api/matches",
            get(matches::list_matches).post(matches::create_match),
        )
        .route("/api/matches/stats/summary", get(stats::get_summary))
        .route("/api/matches/:id", get(matches::get_match))
        .with_state(state)
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Lodstats server up",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
