//! One-shot database seed: wipes the players and matches tables and inserts
//! a small sample data set through the service layer, so every validation
//! rule runs against the seeded records.

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tracing::info;

use lodstats::matches::repository::PostgresMatchRepository;
use lodstats::matches::service::MatchService;
use lodstats::matches::types::MatchCreateRequest;
use lodstats::player::repository::PostgresPlayerRepository;
use lodstats::player::service::PlayerService;
use lodstats::player::types::PlayerCreateRequest;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt().init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    info!("Clearing existing data");
    sqlx::query("TRUNCATE matches, players")
        .execute(&pool)
        .await
        .expect("Failed to clear tables");

    let player_repository = Arc::new(PostgresPlayerRepository::new(pool.clone()));
    let match_repository = Arc::new(PostgresMatchRepository::new(pool));
    let player_service = PlayerService::new(player_repository.clone());
    let match_service = MatchService::new(match_repository, player_repository);

    let roster = [
        ("Marco", "Rossi", "TechCorp"),
        ("Luca", "Bianchi", "TechCorp"),
        ("Anna", "Verde", "DesignStudio"),
        ("Paolo", "Neri", "DesignStudio"),
        ("Giulia", "Blu", "Marketing"),
        ("Simone", "Giallo", "Marketing"),
        ("Francesco", "Rosa", "Sales"),
        ("Elena", "Viola", "Sales"),
    ];

    let mut ids = Vec::new();
    for (first, last, company) in roster {
        let player = player_service
            .create_player(PlayerCreateRequest {
                first_name: first.to_string(),
                last_name: last.to_string(),
                company: company.to_string(),
            })
            .await
            .expect("Failed to seed player");
        ids.push(player.id);
    }
    info!(count = ids.len(), "Seeded players");

    // (date, team A indices, team B indices, score A, score B)
    let fixtures = [
        ((24, 15, 30), vec![0, 1], vec![2, 3], 10, 8),
        ((24, 14, 15), vec![2], vec![0], 6, 10),
        ((24, 16, 45), vec![4, 5], vec![6, 7], 12, 10),
        ((23, 18, 20), vec![1, 3], vec![4, 6], 8, 12),
        ((23, 12, 30), vec![0], vec![5], 15, 13),
    ];

    let mut seeded = 0;
    for ((day, hour, minute), team_a, team_b, score_a, score_b) in fixtures {
        let date = Utc.with_ymd_and_hms(2025, 7, day, hour, minute, 0).unwrap();
        match_service
            .create_match(MatchCreateRequest {
                date: Some(date),
                team_a: team_a.iter().map(|&i| ids[i].clone()).collect(),
                team_b: team_b.iter().map(|&i| ids[i].clone()).collect(),
                score_a,
                score_b,
            })
            .await
            .expect("Failed to seed match");
        seeded += 1;
    }
    info!(count = seeded, "Seeded matches");

    info!("Database seed complete");
}
