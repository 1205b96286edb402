use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, query::QueryParams, validated::ValidatedJson};
use crate::api::dtos::requests::{
    patch_optional, AdminCreateBookingRequest, BookingListQuery, CreateBookingRequest, UpdateBookingRequest,
};
use crate::domain::models::booking::{Booking, BookingFilter, BookingStatus, NewBookingParams};
use crate::domain::models::room::Room;
use crate::domain::services::{
    availability::{validate_guests, validate_stay},
    pricing::{parse_price, total_for_stay},
};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

struct Pricing {
    room_price: i64,
    total_amount: i64,
}

/// Validates the stay against the room and computes the default amounts.
fn quote(room: &Room, request: &CreateBookingRequest) -> Result<Pricing, AppError> {
    let nights = validate_stay(request.check_in_date, request.check_out_date)?;
    validate_guests(request.number_of_guests, room.capacity)?;

    let room_price = match parse_price(&room.price) {
        Some(price) => price,
        None => {
            warn!("Room {} has no usable price ({:?}); booking priced at 0", room.id, room.price);
            0
        }
    };
    Ok(Pricing { room_price, total_amount: total_for_stay(room_price, nights) })
}

fn new_booking(request: CreateBookingRequest, pricing: Pricing, status: BookingStatus) -> Booking {
    Booking::new(NewBookingParams {
        room_id: request.room_id,
        customer_name: request.customer_name,
        customer_email: request.customer_email,
        customer_phone: request.customer_phone,
        check_in_date: request.check_in_date,
        check_out_date: request.check_out_date,
        number_of_guests: request.number_of_guests,
        room_price: pricing.room_price,
        total_amount: pricing.total_amount,
        status,
        special_requests: request.special_requests,
    })
}

/// Guest booking from the website. Always starts PENDING.
pub async fn create_public_booking(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&payload.room_id).await?
        .filter(Room::is_active)
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let pricing = quote(&room, &payload)?;
    let booking = new_booking(payload, pricing, BookingStatus::Pending);

    match state.booking_repo.create_if_available(&booking).await {
        Ok(created) => {
            info!("Booking {} created for room {} ({} -> {})", created.id, room.slug, created.check_in_date, created.check_out_date);
            Ok(Json(created))
        }
        Err(AppError::Conflict(msg)) => {
            warn!("Booking rejected for room {}: {}", room.slug, msg);
            Err(AppError::Conflict(msg))
        }
        Err(e) => Err(e),
    }
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = BookingFilter { room_id: query.room_id, status: query.status };
    let bookings = state.booking_repo.list(&filter).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<AdminCreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&payload.booking.room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let mut pricing = quote(&room, &payload.booking)?;
    if let Some(room_price) = payload.room_price {
        let nights = (payload.booking.check_out_date - payload.booking.check_in_date).num_days();
        pricing = Pricing { room_price, total_amount: total_for_stay(room_price, nights) };
    }
    if let Some(total_amount) = payload.total_amount {
        pricing.total_amount = total_amount;
    }

    let status = payload.status.unwrap_or(BookingStatus::Pending);
    let booking = new_booking(payload.booking, pricing, status);
    let created = state.booking_repo.create_if_available(&booking).await?;

    info!("Admin {} created booking {} ({})", admin.0.id, created.id, created.status);
    Ok(Json(created))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if let Some(room_id) = payload.room_id { booking.room_id = room_id; }
    if let Some(name) = payload.customer_name { booking.customer_name = name; }
    if let Some(email) = payload.customer_email { booking.customer_email = email; }
    if let Some(phone) = payload.customer_phone { booking.customer_phone = phone; }
    if let Some(check_in) = payload.check_in_date { booking.check_in_date = check_in; }
    if let Some(check_out) = payload.check_out_date { booking.check_out_date = check_out; }
    if let Some(guests) = payload.number_of_guests { booking.number_of_guests = guests; }
    if let Some(room_price) = payload.room_price { booking.room_price = room_price; }
    if let Some(total_amount) = payload.total_amount { booking.total_amount = total_amount; }
    if let Some(status) = payload.status { booking.status = status.to_string(); }
    patch_optional(&mut booking.special_requests, payload.special_requests);

    let room = state.room_repo.find_by_id(&booking.room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    validate_stay(booking.check_in_date, booking.check_out_date)?;
    validate_guests(booking.number_of_guests, room.capacity)?;

    booking.updated_at = Utc::now();
    let updated = state.booking_repo.update_if_available(&booking).await?;

    info!("Updated booking {} ({})", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.delete(&booking_id).await?;
    info!("Deleted booking {}", booking_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
