use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::PlayerService,
    types::{PlayerCreateRequest, PlayerListQuery, PlayerListResponse, PlayerResponse},
};
use crate::shared::{ApiResponse, AppError, AppState};

/// HTTP handler for listing players
///
/// GET /api/players?search=&company=
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<PlayerListResponse>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let players = service.list_players(query).await?;

    info!(count = players.len(), "Players listed successfully");

    let count = players.len();
    Ok(Json(PlayerListResponse {
        success: true,
        data: players,
        count,
    }))
}

/// HTTP handler for creating a new player
///
/// POST /api/players
/// Returns the created player with its generated id
#[instrument(name = "create_player", skip(state, request))]
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<PlayerCreateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlayerResponse>>), AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let player = service.create_player(request).await?;

    info!(
        player_id = %player.id,
        full_name = %player.full_name,
        "Player created successfully"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Player created successfully", player)),
    ))
}

/// HTTP handler for fetching a single player
///
/// GET /api/players/:id
#[instrument(name = "get_player", skip(state))]
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<ApiResponse<PlayerResponse>>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let player = service.get_player(&player_id).await?;

    Ok(Json(ApiResponse::data(player)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        let app_state = AppStateBuilder::new().build();
        Router::new()
            .route(
                "/api/players",
                axum::routing::get(list_players).post(create_player),
            )
            .route("/api/players/:id", axum::routing::get(get_player))
            .with_state(app_state)
    }

    fn post_player(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/players")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_player_handler() {
        let app = app();

        let request = post_player(
            r#"{"first_name": "mArco", "last_name": "rossi", "company": "TechCorp"}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["data"]["first_name"], "Marco");
        assert_eq!(envelope["data"]["last_name"], "Rossi");
        assert_eq!(envelope["data"]["full_name"], "Marco Rossi");
    }

    #[tokio::test]
    async fn test_create_duplicate_player_returns_conflict() {
        let app = app();

        let first = post_player(
            r#"{"first_name": "Marco", "last_name": "Rossi", "company": "TechCorp"}"#,
        );
        let response = app.clone().oneshot(first).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let second = post_player(
            r#"{"first_name": "MARCO", "last_name": "ROSSI", "company": "techcorp"}"#,
        );
        let response = app.oneshot(second).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope["success"], false);
    }

    #[tokio::test]
    async fn test_create_player_with_empty_field_returns_bad_request() {
        let app = app();

        let request =
            post_player(r#"{"first_name": "", "last_name": "Rossi", "company": "TechCorp"}"#);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_player_with_missing_field_is_rejected() {
        let app = app();

        let request = post_player(r#"{"first_name": "Marco"}"#);
        let response = app.oneshot(request).await.unwrap();

        // Missing fields fail JSON deserialization before validation runs
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_player_handler() {
        let app = app();

        let request = post_player(
            r#"{"first_name": "Anna", "last_name": "Verde", "company": "DesignStudio"}"#,
        );
        let response = app.clone().oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let id = envelope["data"]["id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .method("GET")
            .uri(format!("/api/players/{}", id))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope["data"]["full_name"], "Anna Verde");
    }

    #[tokio::test]
    async fn test_get_player_with_malformed_id_returns_bad_request() {
        let app = app();

        let request = Request::builder()
            .method("GET")
            .uri("/api/players/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_nonexistent_player_returns_not_found() {
        let app = app();

        let request = Request::builder()
            .method("GET")
            .uri("/api/players/550e8400-e29b-41d4-a716-446655440000")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_players_handler_with_search() {
        let app = app();

        for body in [
            r#"{"first_name": "Marco", "last_name": "Rossi", "company": "TechCorp"}"#,
            r#"{"first_name": "Anna", "last_name": "Verde", "company": "DesignStudio"}"#,
        ] {
            let response = app.clone().oneshot(post_player(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let request = Request::builder()
            .method("GET")
            .uri("/api/players?search=ross")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let list: PlayerListResponse = serde_json::from_slice(&body).unwrap();

        assert!(list.success);
        assert_eq!(list.count, 1);
        assert_eq!(list.data[0].last_name, "Rossi");
    }
}
