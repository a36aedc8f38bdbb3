//! Team handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, models::Team, services::TeamService, state::AppState};

use super::request::CreateTeamRequest;

/// Create a team
pub async fn create_team(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeamRequest>,
) -> AppResult<(StatusCode, Json<Team>)> {
    payload.validate()?;

    let team = TeamService::create_team(state.teams(), &payload.name).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// List every team
pub async fn list_teams(State(state): State<AppState>) -> AppResult<Json<Vec<Team>>> {
    let teams = TeamService::list_teams(state.teams()).await?;

    Ok(Json(teams))
}

/// Get a team by ID
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Team>> {
    let team = TeamService::get_team(state.teams(), id).await?;

    Ok(Json(team))
}
