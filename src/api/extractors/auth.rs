use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::user::{User, ROLE_ADMIN};
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{warn, Span};

pub const AUTH_COOKIE: &str = "auth-token";

/// Id of the synthetic admin yielded by `AUTH_DEV_BYPASS`. No `users` row exists for it.
pub const DEV_BYPASS_USER_ID: &str = "dev-admin";

/// Any signed-in user with a live session.
pub struct AuthUser(pub User);

/// A signed-in user whose role is `ADMIN`.
pub struct AdminUser(pub User);

/// Reads the bearer token from the `auth-token` cookie, falling back to the
/// `Authorization: Bearer` header.
pub fn bearer_token(parts: &Parts) -> Option<String> {
    if let Some(cookies) = parts.extensions.get::<Cookies>()
        && let Some(cookie) = cookies.get(AUTH_COOKIE) {
        let value = cookie.value().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }

    parts.headers.get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn dev_bypass_user() -> User {
    User {
        id: DEV_BYPASS_USER_ID.to_string(),
        email: "dev@localhost".to_string(),
        name: "Development Admin".to_string(),
        password_hash: String::new(),
        role: ROLE_ADMIN.to_string(),
        created_at: chrono::Utc::now(),
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        if app_state.config.auth_dev_bypass {
            warn!("Authentication bypassed for {}", parts.uri.path());
            return Ok(AuthUser(dev_bypass_user()));
        }

        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let user = app_state.auth_service.validate_session(&token).await?;

        Span::current().record("user_id", &user.id);

        Ok(AuthUser(user))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Administrator role required".into()));
        }

        Ok(AdminUser(user))
    }
}

/// The raw bearer token, if any, without validating it.
pub struct BearerToken(pub Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_token(parts)))
    }
}
