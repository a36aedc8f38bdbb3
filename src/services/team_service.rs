//! Team service

use uuid::Uuid;

use crate::{
    db::repositories::TeamRepository,
    error::{AppError, AppResult},
    models::Team,
};

/// Team service for business logic
pub struct TeamService;

impl TeamService {
    /// Create a team
    pub async fn create_team(teams: &dyn TeamRepository, name: &str) -> AppResult<Team> {
        let team = teams.save(Team::new(name)).await?;
        tracing::info!(team_id = %team.id, name = %team.name, "Team created");
        Ok(team)
    }

    /// Every team, oldest first
    pub async fn list_teams(teams: &dyn TeamRepository) -> AppResult<Vec<Team>> {
        teams.find_all().await
    }

    /// Get team by ID
    pub async fn get_team(teams: &dyn TeamRepository, id: Uuid) -> AppResult<Team> {
        teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))
    }
}
