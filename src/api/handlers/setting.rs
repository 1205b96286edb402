use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, validated::ValidatedJson};
use crate::api::dtos::requests::UpsertSettingsRequest;
use crate::domain::models::setting::SiteSetting;
use crate::error::AppError;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Public view: a flat `{key: value}` map.
pub async fn public_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.setting_repo.list().await?;
    let map: BTreeMap<String, String> = settings.into_iter().map(|s| (s.key, s.value)).collect();
    Ok(Json(map))
}

pub async fn list_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.setting_repo.list().await?))
}

pub async fn upsert_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<UpsertSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut saved = Vec::with_capacity(payload.settings.len());
    for input in payload.settings {
        let setting = SiteSetting::new(input.key.trim().to_string(), input.value, input.description);
        saved.push(state.setting_repo.upsert(&setting).await?);
    }

    info!("Saved {} site settings", saved.len());
    Ok(Json(saved))
}

pub async fn delete_setting(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.setting_repo.delete(&key).await?;
    info!("Deleted site setting: {}", key);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
