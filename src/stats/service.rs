use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::types::{SummaryResponse, TopPlayer};
use crate::matches::repository::MatchRepository;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;

/// Service computing aggregate statistics over both stores
pub struct StatsService {
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
    ) -> Self {
        Self {
            player_repository,
            match_repository,
        }
    }

    /// Computes the summary: store counts plus the player appearing in the
    /// most matches. The tie-break between equally frequent players is
    /// whichever was encountered first during the scan and is not a
    /// guaranteed contract.
    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<SummaryResponse, AppError> {
        let total_matches = self.match_repository.count_matches().await?;
        let total_players = self.player_repository.count_players().await?;

        let matches = self.match_repository.all_matches().await?;

        let mut appearances: HashMap<&str, u64> = HashMap::new();
        let mut encounter_order: Vec<&str> = Vec::new();
        for m in &matches {
            for id in m.player_ids() {
                let count = appearances.entry(id.as_str()).or_insert(0);
                if *count == 0 {
                    encounter_order.push(id.as_str());
                }
                *count += 1;
            }
        }

        let mut top: Option<(&str, u64)> = None;
        for id in &encounter_order {
            let count = appearances[id];
            if top.map_or(true, |(_, best)| count > best) {
                top = Some((id, count));
            }
        }

        let top_player = match top {
            Some((id, matches_played)) => self
                .player_repository
                .get_player(id)
                .await?
                .map(|player| TopPlayer {
                    player: player.into(),
                    matches_played,
                }),
            None => None,
        };

        debug!(
            total_matches,
            total_players,
            top_player = top_player.as_ref().map(|t| t.player.full_name.as_str()),
            "Summary computed"
        );

        Ok(SummaryResponse {
            total_matches,
            total_players,
            top_player,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::models::MatchModel;
    use crate::matches::repository::InMemoryMatchRepository;
    use crate::player::models::PlayerModel;
    use crate::player::repository::InMemoryPlayerRepository;

    struct Fixture {
        service: StatsService,
        player_repository: Arc<InMemoryPlayerRepository>,
        match_repository: Arc<InMemoryMatchRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            let player_repository = Arc::new(InMemoryPlayerRepository::new());
            let match_repository = Arc::new(InMemoryMatchRepository::new());
            let service =
                StatsService::new(player_repository.clone(), match_repository.clone());
            Self {
                service,
                player_repository,
                match_repository,
            }
        }

        async fn add_player(&self, first: &str, last: &str) -> String {
            let player = PlayerModel::new(
                first.to_string(),
                last.to_string(),
                "TechCorp".to_string(),
            );
            self.player_repository.create_player(&player).await.unwrap();
            player.id
        }

        async fn add_match(&self, team_a: Vec<String>, team_b: Vec<String>, a: i32, b: i32) {
            let m = MatchModel::new(None, team_a, team_b, a, b);
            self.match_repository.create_match(&m).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_summary_with_no_data() {
        let fixture = Fixture::new();

        let summary = fixture.service.summary().await.unwrap();

        assert_eq!(summary.total_matches, 0);
        assert_eq!(summary.total_players, 0);
        assert!(summary.top_player.is_none());
    }

    #[tokio::test]
    async fn test_summary_with_players_but_no_matches() {
        let fixture = Fixture::new();
        fixture.add_player("Marco", "Rossi").await;
        fixture.add_player("Anna", "Verde").await;

        let summary = fixture.service.summary().await.unwrap();

        assert_eq!(summary.total_matches, 0);
        assert_eq!(summary.total_players, 2);
        assert!(summary.top_player.is_none());
    }

    #[tokio::test]
    async fn test_summary_counts_appearances_across_both_teams() {
        let fixture = Fixture::new();
        let p1 = fixture.add_player("Marco", "Rossi").await;
        let p2 = fixture.add_player("Luca", "Bianchi").await;
        let p3 = fixture.add_player("Anna", "Verde").await;

        fixture
            .add_match(vec![p1.clone(), p2.clone()], vec![p3.clone()], 10, 8)
            .await;
        fixture.add_match(vec![p1.clone()], vec![p3.clone()], 6, 10).await;

        let summary = fixture.service.summary().await.unwrap();

        assert_eq!(summary.total_matches, 2);
        assert_eq!(summary.total_players, 3);

        // p1 and p3 both played 2 matches; the tie-break between them is
        // unspecified, but p2 (1 match) can never win
        let top = summary.top_player.unwrap();
        assert_eq!(top.matches_played, 2);
        assert!(top.player.id == p1 || top.player.id == p3);
        assert_ne!(top.player.id, p2);
    }

    #[tokio::test]
    async fn test_summary_picks_clear_leader() {
        let fixture = Fixture::new();
        let p1 = fixture.add_player("Marco", "Rossi").await;
        let p2 = fixture.add_player("Luca", "Bianchi").await;
        let p3 = fixture.add_player("Anna", "Verde").await;

        fixture.add_match(vec![p1.clone()], vec![p2.clone()], 10, 8).await;
        fixture.add_match(vec![p1.clone()], vec![p3.clone()], 6, 10).await;
        fixture.add_match(vec![p2.clone()], vec![p3.clone()], 5, 5).await;
        fixture.add_match(vec![p1.clone()], vec![p2.clone()], 12, 10).await;

        let summary = fixture.service.summary().await.unwrap();

        let top = summary.top_player.unwrap();
        assert_eq!(top.player.id, p1);
        assert_eq!(top.matches_played, 3);
        assert_eq!(top.player.full_name, "Marco Rossi");
    }
}
