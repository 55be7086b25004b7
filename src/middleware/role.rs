//! Route layers for session and role checks.
//!
//! Both layers resolve the caller through [`AuthUser`] so the handler can
//! extract it again without a second lookup.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use userhub_core::AppError;
use userhub_models::Role;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Lets the request through when it carries a valid session.
///
/// ```rust,ignore
/// let routes = get(list_users)
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_session));
/// ```
pub async fn require_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    AuthUser::from_request_parts(&mut parts, &state).await?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Lets the request through when the session belongs to an admin.
///
/// Authentication runs first, so a missing or bad token is 401 and only an
/// authenticated non-admin gets 403.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    ensure_admin(&auth_user)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub fn ensure_admin(auth_user: &AuthUser) -> Result<(), AppError> {
    match auth_user.role() {
        Role::Admin => Ok(()),
        Role::Standard => {
            warn!(email = %auth_user.email(), "Admin route refused to standard user");
            Err(AppError::forbidden("Admin role required"))
        }
    }
}
