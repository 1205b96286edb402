use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AdminUser, query::QueryParams, validated::ValidatedJson};
use crate::api::dtos::requests::{
    patch_optional, AssignCustomerRequest, CreateCustomerRequest, CustomerListQuery, PageQuery,
    UpdateCustomerRequest, UpdateCustomerStatusRequest,
};
use crate::api::dtos::responses::{CustomerStatsResponse, Paginated};
use crate::domain::models::customer::{Customer, CustomerFilter, CustomerStatus, NewCustomerParams};
use crate::error::AppError;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Contact form submission. Leads always start as NEW.
pub async fn create_public_customer(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer = Customer::new(NewCustomerParams {
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        email: payload.email.filter(|e| !e.trim().is_empty()),
        province_code: payload.province_code,
        province_name: payload.province_name,
        ward_code: payload.ward_code,
        ward_name: payload.ward_name,
        source: payload.source.filter(|s| !s.trim().is_empty()),
        notes: payload.notes,
    });

    let created = state.customer_repo.create(&customer).await?;
    info!("New lead {} from {}", created.id, created.source);
    Ok(Json(created))
}

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<CustomerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit, offset) = PageQuery { page: query.page, limit: query.limit }.window();

    let filter = CustomerFilter {
        status: query.status,
        assigned_to: query.assigned_to.filter(|s| !s.is_empty()),
        search: query.search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        limit,
        offset,
    };

    let (items, total) = state.customer_repo.list(&filter).await?;
    Ok(Json(Paginated { items, total, page, limit }))
}

pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state.customer_repo.find_by_id(&customer_id).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;
    Ok(Json(customer))
}

pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(customer_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut customer = state.customer_repo.find_by_id(&customer_id).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;

    if let Some(name) = payload.name { customer.name = name; }
    if let Some(phone) = payload.phone { customer.phone = phone; }
    if let Some(source) = payload.source { customer.source = source; }
    if let Some(status) = payload.status { customer.status = status.to_string(); }
    patch_optional(&mut customer.email, payload.email);
    patch_optional(&mut customer.province_code, payload.province_code);
    patch_optional(&mut customer.province_name, payload.province_name);
    patch_optional(&mut customer.ward_code, payload.ward_code);
    patch_optional(&mut customer.ward_name, payload.ward_name);
    patch_optional(&mut customer.notes, payload.notes);
    if payload.last_contact_date.is_some() { customer.last_contact_date = payload.last_contact_date; }
    if payload.next_follow_up_date.is_some() { customer.next_follow_up_date = payload.next_follow_up_date; }
    customer.updated_at = Utc::now();

    let updated = state.customer_repo.update(&customer).await?;
    info!("Updated customer {}", updated.id);
    Ok(Json(updated))
}

pub async fn update_customer_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(customer_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.customer_repo.update_status(&customer_id, payload.status).await?;
    info!("Customer {} moved to {}", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn assign_customer(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(customer_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<AssignCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let assignee = payload.user_id.filter(|id| !id.is_empty());

    if let Some(user_id) = &assignee
        && state.user_repo.find_by_id(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }

    let updated = state.customer_repo.assign(&customer_id, assignee.as_deref()).await?;
    info!("Customer {} assigned to {:?}", updated.id, updated.assigned_to);
    Ok(Json(updated))
}

pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.customer_repo.delete(&customer_id).await?;
    info!("Deleted customer {}", customer_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn customer_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let counts = state.customer_repo.count_by_status().await?;

    let mut by_status: BTreeMap<String, i64> = CustomerStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    for row in &counts {
        by_status.insert(row.status.clone(), row.count);
    }
    let total = counts.iter().map(|row| row.count).sum::<i64>();

    Ok(Json(CustomerStatsResponse { total, by_status }))
}
