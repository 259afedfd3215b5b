use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::PlayerModel;
use crate::shared::AppError;

/// Hard cap on listing results
pub const LIST_LIMIT: usize = 100;

/// Optional filters for listing players; filters compose with logical AND
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    /// Case-insensitive substring match on first OR last name
    pub search: Option<String>,
    /// Case-insensitive substring match on company name
    pub company: Option<String>,
}

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository {
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError>;
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerModel>, AppError>;

    /// Case-insensitive lookup by the identifying (first, last, company) triple
    async fn find_by_triple(
        &self,
        first: &str,
        last: &str,
        company: &str,
    ) -> Result<Option<PlayerModel>, AppError>;

    /// Filtered listing, ordered by last name then first name, capped at
    /// [`LIST_LIMIT`] entries
    async fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<PlayerModel>, AppError>;

    async fn count_players(&self) -> Result<u64, AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    players: Mutex<HashMap<String, PlayerModel>>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        debug!(player_id = %player.id, "Creating player in memory");

        let mut players = self.players.lock().unwrap();
        if players.contains_key(&player.id) {
            warn!(player_id = %player.id, "Player id already exists in memory");
            return Err(AppError::Database("Player already exists".to_string()));
        }
        players.insert(player.id.clone(), player.clone());

        debug!(player_id = %player.id, "Player created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        let player = players.get(player_id).cloned();

        match &player {
            Some(p) => debug!(player_id = %player_id, last_name = %p.last_name, "Player found in memory"),
            None => debug!(player_id = %player_id, "Player not found in memory"),
        }

        Ok(player)
    }

    #[instrument(skip(self))]
    async fn find_by_triple(
        &self,
        first: &str,
        last: &str,
        company: &str,
    ) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        let found = players
            .values()
            .find(|p| p.matches_triple(first, last, company))
            .cloned();
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<PlayerModel>, AppError> {
        debug!(?filter, "Listing players from memory");

        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let company = filter.company.as_ref().map(|c| c.to_lowercase());

        let players = self.players.lock().unwrap();
        let mut result: Vec<PlayerModel> = players
            .values()
            .filter(|p| {
                search.as_ref().map_or(true, |s| {
                    p.first_name.to_lowercase().contains(s)
                        || p.last_name.to_lowercase().contains(s)
                })
            })
            .filter(|p| {
                company
                    .as_ref()
                    .map_or(true, |c| p.company.to_lowercase().contains(c))
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        result.truncate(LIST_LIMIT);

        debug!(count = result.len(), "Players listed successfully from memory");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn count_players(&self) -> Result<u64, AppError> {
        let players = self.players.lock().unwrap();
        Ok(players.len() as u64)
    }
}

/// PostgreSQL implementation of the player repository
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_model(row: &sqlx::postgres::PgRow) -> PlayerModel {
        PlayerModel {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            company: row.get("company"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        debug!(player_id = %player.id, "Creating player in database");

        sqlx::query(
            "INSERT INTO players (id, first_name, last_name, company, created_at) VALUES ($1, $2, $3, $4, $5)"
        )
        .bind(&player.id)
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.company)
        .bind(player.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                warn!(player_id = %player.id, "Player triple already exists in database");
                AppError::Duplicate("Player already exists".to_string())
            } else {
                warn!(error = %e, "Failed to create player in database");
                AppError::Database(e.to_string())
            }
        })?;

        debug!(player_id = %player.id, "Player created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: &str) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, company, created_at FROM players WHERE id = $1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player_id = %player_id, "Failed to fetch player from database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_model))
    }

    #[instrument(skip(self))]
    async fn find_by_triple(
        &self,
        first: &str,
        last: &str,
        company: &str,
    ) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, company, created_at FROM players \
             WHERE LOWER(first_name) = LOWER($1) AND LOWER(last_name) = LOWER($2) AND LOWER(company) = LOWER($3)",
        )
        .bind(first)
        .bind(last)
        .bind(company)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to look up player triple in database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_model))
    }

    #[instrument(skip(self))]
    async fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<PlayerModel>, AppError> {
        debug!(?filter, "Listing players from database");

        let rows = sqlx::query(
            "SELECT id, first_name, last_name, company, created_at FROM players \
             WHERE ($1::text IS NULL OR first_name ILIKE '%' || $1 || '%' OR last_name ILIKE '%' || $1 || '%') \
               AND ($2::text IS NULL OR company ILIKE '%' || $2 || '%') \
             ORDER BY last_name, first_name \
             LIMIT $3",
        )
        .bind(filter.search.as_deref())
        .bind(filter.company.as_deref())
        .bind(LIST_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list players from database");
            AppError::Database(e.to_string())
        })?;

        Ok(rows.iter().map(Self::row_to_model).collect())
    }

    #[instrument(skip(self))]
    async fn count_players(&self) -> Result<u64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM players")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to count players in database");
                AppError::Database(e.to_string())
            })?;

        let count: i64 = row.get("count");
        Ok(count as u64)
    }
}
