use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, query::QueryParams, validated::ValidatedJson};
use crate::api::dtos::requests::{patch_optional, BannerQuery, CreateBannerRequest, UpdateBannerRequest};
use crate::domain::models::banner::Banner;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

const DEFAULT_POSITION: &str = "home";

pub async fn list_banners(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<BannerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let banners = state.banner_repo.list(true, query.position.as_deref()).await?;
    Ok(Json(banners))
}

pub async fn admin_list_banners(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<BannerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let banners = state.banner_repo.list(false, query.position.as_deref()).await?;
    Ok(Json(banners))
}

pub async fn create_banner(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateBannerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let position = payload.position.unwrap_or_else(|| DEFAULT_POSITION.to_string());
    let mut banner = Banner::new(payload.title, payload.image_url, position);
    banner.subtitle = payload.subtitle;
    banner.link_url = payload.link_url;
    banner.button_text = payload.button_text;
    if let Some(sort_order) = payload.sort_order { banner.sort_order = sort_order; }
    if let Some(is_active) = payload.is_active { banner.is_active = is_active; }

    let created = state.banner_repo.create(&banner).await?;
    info!("Created banner: {} at {}", created.title, created.position);
    Ok(Json(created))
}

pub async fn update_banner(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(banner_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBannerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut banner = state.banner_repo.find_by_id(&banner_id).await?
        .ok_or(AppError::NotFound("Banner not found".into()))?;

    if let Some(title) = payload.title { banner.title = title; }
    if let Some(image_url) = payload.image_url { banner.image_url = image_url; }
    if let Some(position) = payload.position { banner.position = position; }
    patch_optional(&mut banner.subtitle, payload.subtitle);
    patch_optional(&mut banner.link_url, payload.link_url);
    patch_optional(&mut banner.button_text, payload.button_text);
    if let Some(sort_order) = payload.sort_order { banner.sort_order = sort_order; }
    if let Some(is_active) = payload.is_active { banner.is_active = is_active; }
    banner.updated_at = Utc::now();

    let updated = state.banner_repo.update(&banner).await?;
    info!("Updated banner: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_banner(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(banner_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.banner_repo.delete(&banner_id).await?;
    info!("Deleted banner: {}", banner_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
