use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, validated::ValidatedJson};
use crate::api::dtos::requests::{patch_optional, CreateTeamMemberRequest, UpdateTeamMemberRequest};
use crate::domain::models::team_member::TeamMember;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn list_team_members(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.team_member_repo.list(true).await?))
}

pub async fn admin_list_team_members(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.team_member_repo.list(false).await?))
}

pub async fn create_team_member(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut member = TeamMember::new(payload.name, payload.position);
    member.bio = payload.bio;
    member.image_url = payload.image_url;
    if let Some(sort_order) = payload.sort_order { member.sort_order = sort_order; }
    if let Some(is_active) = payload.is_active { member.is_active = is_active; }

    let created = state.team_member_repo.create(&member).await?;
    info!("Added team member: {}", created.name);
    Ok(Json(created))
}

pub async fn update_team_member(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(member_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut member = state.team_member_repo.find_by_id(&member_id).await?
        .ok_or(AppError::NotFound("Team member not found".into()))?;

    if let Some(name) = payload.name { member.name = name; }
    if let Some(position) = payload.position { member.position = position; }
    patch_optional(&mut member.bio, payload.bio);
    patch_optional(&mut member.image_url, payload.image_url);
    if let Some(sort_order) = payload.sort_order { member.sort_order = sort_order; }
    if let Some(is_active) = payload.is_active { member.is_active = is_active; }
    member.updated_at = Utc::now();

    let updated = state.team_member_repo.update(&member).await?;
    Ok(Json(updated))
}

pub async fn delete_team_member(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.team_member_repo.delete(&member_id).await?;
    info!("Removed team member: {}", member_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
