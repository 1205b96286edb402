use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::user::User;
use crate::api::extractors::auth::{bearer_token, dev_bypass_user};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves the caller if a valid session is presented; anyone else is a guest.
pub struct MaybeAuthUser(pub Option<User>);

impl MaybeAuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|u| u.is_admin())
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        if app_state.config.auth_dev_bypass {
            warn!("Authentication bypassed for {}", parts.uri.path());
            return Ok(MaybeAuthUser(Some(dev_bypass_user())));
        }

        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeAuthUser(None));
        };

        match app_state.auth_service.validate_session(&token).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(e) => {
                // Expired or forged token -> treat as guest
                debug!("MaybeAuth: ignoring invalid session: {}", e);
                Ok(MaybeAuthUser(None))
            }
        }
    }
}
