//! Team request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_TEAM_NAME_LENGTH;

/// Create team request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = MAX_TEAM_NAME_LENGTH))]
    pub name: String,
}
