use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use tracing::{debug, warn};
use userhub_auth::{SESSION_HEADER, token_from_header};
use userhub_core::AppError;
use userhub_models::{Role, User};

use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Extractor resolving the caller's session to a stored user.
///
/// The first extraction in a request stores the result in the request
/// extensions; later ones (a route layer followed by the handler) reuse it.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn role(&self) -> Role {
        self.0.role()
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

/// Reads the session header, verifies the token and loads its user.
///
/// A missing header, an undecodable token and a token whose e-mail has no
/// user all yield 401.
pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<User, AppError> {
    let header = headers
        .get(SESSION_HEADER)
        .ok_or_else(|| AppError::unauthorized("Missing session token"))?;

    let token = header
        .to_str()
        .ok()
        .and_then(token_from_header)
        .ok_or_else(|| AppError::unauthorized("Invalid session token"))?;

    let email = state.session.decode(token).map_err(|e| {
        debug!(error = %e, "Session token rejected");
        AppError::unauthorized("Invalid session token")
    })?;

    UserService::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "Session token refers to an unknown user");
            AppError::unauthorized("Invalid session token")
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let auth_user = AuthUser(authenticate(&parts.headers, state).await?);
        parts.extensions.insert(auth_user.clone());
        Ok(auth_user)
    }
}
