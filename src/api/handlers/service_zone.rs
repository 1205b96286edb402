use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, validated::ValidatedJson};
use crate::api::dtos::requests::{patch_optional, CreateServiceZoneRequest, UpdateServiceZoneRequest};
use crate::domain::models::room::ListingStatus;
use crate::domain::models::service_zone::{NewServiceZoneParams, ServiceZone};
use crate::domain::services::{serialized_list::encode_list, slug::slugify};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn list_service_zones(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.service_zone_repo.list(true).await?))
}

pub async fn get_service_zone_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let zone = state.service_zone_repo.find_by_slug(&slug).await?
        .filter(|z| z.status == ListingStatus::Active.as_str())
        .ok_or(AppError::NotFound("Service zone not found".into()))?;
    Ok(Json(zone))
}

pub async fn admin_list_service_zones(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.service_zone_repo.list(false).await?))
}

pub async fn create_service_zone(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateServiceZoneRequest>,
) -> Result<impl IntoResponse, AppError> {
    let slug = slugify(payload.slug.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or(&payload.name));
    if slug.is_empty() {
        return Err(AppError::Validation("Could not derive a slug from the given name".into()));
    }

    let zone = ServiceZone::new(NewServiceZoneParams {
        slug,
        name: payload.name,
        description: payload.description,
        features: encode_list(&payload.features.unwrap_or_default()),
        images: encode_list(&payload.images.unwrap_or_default()),
        sort_order: payload.sort_order.unwrap_or(0),
        status: payload.status.unwrap_or(ListingStatus::Active),
    });

    let created = state.service_zone_repo.create(&zone).await?;
    info!("Created service zone: {}", created.slug);
    Ok(Json(created))
}

pub async fn update_service_zone(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(zone_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateServiceZoneRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut zone = state.service_zone_repo.find_by_id(&zone_id).await?
        .ok_or(AppError::NotFound("Service zone not found".into()))?;

    if let Some(slug) = payload.slug {
        let slug = slugify(&slug);
        if slug.is_empty() {
            return Err(AppError::Validation("Invalid slug".into()));
        }
        zone.slug = slug;
    }
    if let Some(name) = payload.name { zone.name = name; }
    patch_optional(&mut zone.description, payload.description);
    if let Some(features) = payload.features { zone.features = encode_list(&features); }
    if let Some(images) = payload.images { zone.images = encode_list(&images); }
    if let Some(sort_order) = payload.sort_order { zone.sort_order = sort_order; }
    if let Some(status) = payload.status { zone.status = status.to_string(); }
    zone.updated_at = Utc::now();

    let updated = state.service_zone_repo.update(&zone).await?;
    info!("Updated service zone: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_service_zone(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(zone_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.service_zone_repo.delete(&zone_id).await?;
    info!("Deleted service zone: {}", zone_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
