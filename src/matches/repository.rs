use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::MatchModel;
use crate::shared::AppError;

/// One page of matches plus the total number of matching records
#[derive(Debug, Clone)]
pub struct MatchPage {
    pub matches: Vec<MatchModel>,
    pub total: u64,
}

/// Trait for match repository operations
#[async_trait]
pub trait MatchRepository {
    async fn create_match(&self, m: &MatchModel) -> Result<(), AppError>;
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError>;

    /// Paginated listing ordered by date descending, optionally restricted to
    /// matches involving the given player id
    async fn list_matches(
        &self,
        player_id: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<MatchPage, AppError>;

    /// All matches ordered by date descending; used by the aggregation scan
    async fn all_matches(&self) -> Result<Vec<MatchModel>, AppError>;

    async fn count_matches(&self) -> Result<u64, AppError>;
}

/// In-memory implementation of MatchRepository for development and testing
pub struct InMemoryMatchRepository {
    matches: Mutex<HashMap<String, MatchModel>>,
}

impl Default for InMemoryMatchRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMatchRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            matches: Mutex::new(HashMap::new()),
        }
    }

    fn sorted_matches(&self, player_id: Option<&str>) -> Vec<MatchModel> {
        let matches = self.matches.lock().unwrap();
        let mut result: Vec<MatchModel> = matches
            .values()
            .filter(|m| player_id.map_or(true, |id| m.involves_player(id)))
            .cloned()
            .collect();
        // Most recent first; id as secondary key for a stable order
        result.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        result
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, m))]
    async fn create_match(&self, m: &MatchModel) -> Result<(), AppError> {
        debug!(match_id = %m.id, "Creating match in memory");

        let mut matches = self.matches.lock().unwrap();
        if matches.contains_key(&m.id) {
            warn!(match_id = %m.id, "Match already exists in memory");
            return Err(AppError::Database("Match already exists".to_string()));
        }
        matches.insert(m.id.clone(), m.clone());

        debug!(match_id = %m.id, "Match created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError> {
        let matches = self.matches.lock().unwrap();
        let m = matches.get(match_id).cloned();

        match &m {
            Some(_) => debug!(match_id = %match_id, "Match found in memory"),
            None => debug!(match_id = %match_id, "Match not found in memory"),
        }

        Ok(m)
    }

    #[instrument(skip(self))]
    async fn list_matches(
        &self,
        player_id: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<MatchPage, AppError> {
        debug!(?player_id, offset, limit, "Listing matches from memory");

        let all = self.sorted_matches(player_id);
        let total = all.len() as u64;
        let matches = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(MatchPage { matches, total })
    }

    #[instrument(skip(self))]
    async fn all_matches(&self) -> Result<Vec<MatchModel>, AppError> {
        Ok(self.sorted_matches(None))
    }

    #[instrument(skip(self))]
    async fn count_matches(&self) -> Result<u64, AppError> {
        let matches = self.matches.lock().unwrap();
        Ok(matches.len() as u64)
    }
}

/// PostgreSQL implementation of the match repository
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_model(row: &sqlx::postgres::PgRow) -> MatchModel {
        MatchModel {
            id: row.get("id"),
            date: row.get("date"),
            team_a: row.get("team_a"),
            team_b: row.get("team_b"),
            score_a: row.get("score_a"),
            score_b: row.get("score_b"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    #[instrument(skip(self, m))]
    async fn create_match(&self, m: &MatchModel) -> Result<(), AppError> {
        debug!(match_id = %m.id, "Creating match in database");

        sqlx::query(
            "INSERT INTO matches (id, date, team_a, team_b, score_a, score_b, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&m.id)
        .bind(m.date)
        .bind(&m.team_a)
        .bind(&m.team_b)
        .bind(m.score_a)
        .bind(m.score_b)
        .bind(m.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create match in database");
            AppError::Database(e.to_string())
        })?;

        debug!(match_id = %m.id, "Match created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, date, team_a, team_b, score_a, score_b, created_at \
             FROM matches WHERE id = $1",
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, match_id = %match_id, "Failed to fetch match from database");
            AppError::Database(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_model))
    }

    #[instrument(skip(self))]
    async fn list_matches(
        &self,
        player_id: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<MatchPage, AppError> {
        debug!(?player_id, offset, limit, "Listing matches from database");

        let rows = sqlx::query(
            "SELECT id, date, team_a, team_b, score_a, score_b, created_at FROM matches \
             WHERE ($1::text IS NULL OR $1 = ANY(team_a) OR $1 = ANY(team_b)) \
             ORDER BY date DESC, id \
             OFFSET $2 LIMIT $3",
        )
        .bind(player_id)
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list matches from database");
            AppError::Database(e.to_string())
        })?;

        let count_row = sqlx::query(
            "SELECT COUNT(*) AS count FROM matches \
             WHERE ($1::text IS NULL OR $1 = ANY(team_a) OR $1 = ANY(team_b))",
        )
        .bind(player_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to count matches in database");
            AppError::Database(e.to_string())
        })?;

        let total: i64 = count_row.get("count");

        Ok(MatchPage {
            matches: rows.iter().map(Self::row_to_model).collect(),
            total: total as u64,
        })
    }

    #[instrument(skip(self))]
    async fn all_matches(&self) -> Result<Vec<MatchModel>, AppError> {
        let rows = sqlx::query(
            "SELECT id, date, team_a, team_b, score_a, score_b, created_at \
             FROM matches ORDER BY date DESC, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch all matches from database");
            AppError::Database(e.to_string())
        })?;

        Ok(rows.iter().map(Self::row_to_model).collect())
    }

    #[instrument(skip(self))]
    async fn count_matches(&self) -> Result<u64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM matches")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to count matches in database");
                AppError::Database(e.to_string())
            })?;

        let count: i64 = row.get("count");
        Ok(count as u64)
    }
}
