//! Member handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Member, MemberDto, Page},
    services::MemberService,
    state::AppState,
};

use super::{
    request::{BulkAgePlusRequest, CreateMemberRequest, ListMembersQuery},
    response::BulkAgePlusResponse,
};

/// Get a member's username as plain text
pub async fn get_username(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<String> {
    MemberService::find_username(state.members(), id).await
}

/// List members (paginated), optionally filtered by username and team name
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListMembersQuery>,
) -> AppResult<Json<Page<MemberDto>>> {
    let page = query.page_request()?;
    let members = MemberService::list_members(state.members(), &query.filter(), &page).await?;

    Ok(Json(members))
}

/// Create a member
pub async fn create_member(
    State(state): State<AppState>,
    Json(payload): Json<CreateMemberRequest>,
) -> AppResult<(StatusCode, Json<Member>)> {
    payload.validate()?;

    let member =
        MemberService::create_member(state.members(), state.teams(), payload.into()).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// Add one year to every member at or above the given age
pub async fn bulk_age_plus(
    State(state): State<AppState>,
    Json(payload): Json<BulkAgePlusRequest>,
) -> AppResult<Json<BulkAgePlusResponse>> {
    payload.validate()?;

    let updated = MemberService::bulk_age_plus(state.members(), payload.age).await?;

    Ok(Json(BulkAgePlusResponse { updated }))
}
