use std::collections::HashSet;

use crate::shared::AppError;

pub const MAX_TEAM_SIZE: usize = 2;
pub const MAX_SCORE: i32 = 50;

/// Checks that both teams are non-empty and within the allowed size
pub fn validate_teams(team_a: &[String], team_b: &[String]) -> Result<(), AppError> {
    if team_a.is_empty() {
        return Err(AppError::Validation(
            "Team A must have at least one player".to_string(),
        ));
    }
    if team_b.is_empty() {
        return Err(AppError::Validation(
            "Team B must have at least one player".to_string(),
        ));
    }
    if team_a.len() > MAX_TEAM_SIZE {
        return Err(AppError::Validation(format!(
            "Team A can have at most {} players",
            MAX_TEAM_SIZE
        )));
    }
    if team_b.len() > MAX_TEAM_SIZE {
        return Err(AppError::Validation(format!(
            "Team B can have at most {} players",
            MAX_TEAM_SIZE
        )));
    }
    Ok(())
}

/// Checks that no player id appears more than once across both teams
pub fn validate_no_duplicate_players(
    team_a: &[String],
    team_b: &[String],
) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in team_a.iter().chain(team_b.iter()) {
        if !seen.insert(id.as_str()) {
            return Err(AppError::Validation(
                "A player cannot appear more than once in the same match".to_string(),
            ));
        }
    }
    Ok(())
}

/// Checks that both scores are within 0..=MAX_SCORE
pub fn validate_scores(score_a: i32, score_b: i32) -> Result<(), AppError> {
    if score_a < 0 || score_b < 0 {
        return Err(AppError::Validation(
            "Scores cannot be negative".to_string(),
        ));
    }
    if score_a > MAX_SCORE || score_b > MAX_SCORE {
        return Err(AppError::Validation(format!(
            "Scores cannot exceed {}",
            MAX_SCORE
        )));
    }
    Ok(())
}
