use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, query::QueryParams, validated::ValidatedJson};
use crate::api::dtos::requests::{patch_optional, AvailabilityQuery, CreateRoomRequest, UpdateRoomRequest};
use crate::api::dtos::responses::AvailabilityResponse;
use crate::domain::models::room::{ListingStatus, NewRoomParams, Room};
use crate::domain::services::{availability::validate_stay, serialized_list::encode_list, slug::slugify};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

fn resolve_slug(explicit: Option<String>, name: &str) -> Result<String, AppError> {
    let slug = match explicit {
        Some(s) if !s.trim().is_empty() => slugify(&s),
        _ => slugify(name),
    };
    if slug.is_empty() {
        return Err(AppError::Validation("Could not derive a slug from the given name".into()));
    }
    Ok(slug)
}

// Public

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list(true).await?;
    Ok(Json(rooms))
}

pub async fn get_room_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_slug(&slug).await?
        .filter(Room::is_active)
        .ok_or(AppError::NotFound("Room not found".into()))?;
    Ok(Json(room))
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    QueryParams(query): QueryParams<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let nights = validate_stay(query.check_in, query.check_out)?;

    let room = state.room_repo.find_by_slug(&slug).await?
        .filter(Room::is_active)
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let taken = state.booking_repo
        .has_overlap(&room.id, query.check_in, query.check_out, None)
        .await?;

    Ok(Json(AvailabilityResponse {
        room_id: room.id,
        check_in: query.check_in,
        check_out: query.check_out,
        nights,
        available: !taken,
    }))
}

// Admin

pub async fn admin_list_rooms(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list(false).await?;
    Ok(Json(rooms))
}

pub async fn admin_get_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    Ok(Json(room))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let slug = resolve_slug(payload.slug, &payload.name)?;

    let room = Room::new(NewRoomParams {
        slug,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        area: payload.area,
        capacity: payload.capacity,
        bed_type: payload.bed_type,
        features: encode_list(&payload.features.unwrap_or_default()),
        images: encode_list(&payload.images.unwrap_or_default()),
        status: payload.status.unwrap_or(ListingStatus::Active),
        sort_order: payload.sort_order.unwrap_or(0),
    });

    let created = state.room_repo.create(&room).await?;
    info!("Created room: {} ({})", created.name, created.slug);
    Ok(Json(created))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    if let Some(slug) = payload.slug {
        room.slug = resolve_slug(Some(slug), &room.name)?;
    }
    if let Some(name) = payload.name { room.name = name; }
    if let Some(price) = payload.price { room.price = price; }
    patch_optional(&mut room.description, payload.description);
    patch_optional(&mut room.area, payload.area);
    patch_optional(&mut room.bed_type, payload.bed_type);
    if payload.capacity.is_some() { room.capacity = payload.capacity; }
    if let Some(features) = payload.features { room.features = encode_list(&features); }
    if let Some(images) = payload.images { room.images = encode_list(&images); }
    if let Some(status) = payload.status { room.status = status.to_string(); }
    if let Some(sort_order) = payload.sort_order { room.sort_order = sort_order; }
    room.updated_at = Utc::now();

    let updated = state.room_repo.update(&room).await?;
    info!("Updated room: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let bookings = state.booking_repo.count_by_room(&room.id).await?;
    if bookings > 0 {
        warn!("Refusing to delete room {} with {} bookings", room.id, bookings);
        return Err(AppError::Conflict(format!(
            "Room has {} booking(s); cancel or remove them first, or set the room INACTIVE",
            bookings
        )));
    }

    state.room_repo.delete(&room.id).await?;
    info!("Deleted room: {}", room.id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
