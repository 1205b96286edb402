use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{requests::LoginRequest, responses::LoginResponse};
use crate::api::extractors::{auth::{AuthUser, BearerToken, AUTH_COOKIE}, validated::ValidatedJson};
use crate::domain::models::user::UserProfile;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, issued) = state.auth_service.login(&payload.email.trim().to_lowercase(), &payload.password).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, issued.token.clone());
    cookie.set_http_only(true);
    cookie.set_secure(state.config.cookie_secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(Duration::hours(state.config.session_ttl_hours));
    cookies.add(cookie);

    info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: UserProfile::from(user),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = token
        && let Err(e) = state.auth_service.logout(&token).await {
        warn!("Failed to delete session on logout: {}", e);
    }

    cookies.remove(Cookie::build((AUTH_COOKIE, "")).path("/").into());

    info!("User logged out");

    Ok(StatusCode::OK)
}

pub async fn me(user: AuthUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(UserProfile::from(user.0)))
}
