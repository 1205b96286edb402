use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, validated::ValidatedJson};
use crate::api::dtos::requests::{CreateUserRequest, RoleInput};
use crate::domain::models::user::{User, UserProfile, ROLE_ADMIN, ROLE_STAFF};
use crate::domain::services::auth_service::hash_password;
use std::sync::Arc;
use crate::error::AppError;
use tracing::{info, error};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim().to_lowercase();
    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let role = match payload.role.unwrap_or(RoleInput::Staff) {
        RoleInput::Admin => ROLE_ADMIN,
        RoleInput::Staff => ROLE_STAFF,
    };

    let user = User::new(email, payload.name, hash_password(&payload.password)?, role);
    let created = state.user_repo.create(&user).await?;

    info!("Created {} user: {}", created.role, created.id);

    Ok(Json(UserProfile::from(created)))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();
    Ok(Json(profiles))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if admin.0.id == user_id {
        return Err(AppError::Conflict("Cannot delete yourself".into()));
    }

    let target = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    match state.user_repo.delete(&target.id).await {
        Ok(_) => {
            info!("Deleted user {}", user_id);
            Ok(Json(serde_json::json!({"status": "deleted"})))
        },
        Err(e) => {
            error!("Failed to delete user {}: {:?}", user_id, e);
            Err(e)
        }
    }
}
