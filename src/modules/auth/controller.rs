use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;
use userhub_auth::SESSION_HEADER;
use userhub_core::AppError;
use userhub_models::{SessionResponse, SignInRequest};

use crate::modules::ErrorResponse;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Sign in and receive a session token
///
/// The token is returned both in the `authorization` response header and in
/// the body.
#[utoipa::path(
    post,
    path = "/users/sessions",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse,
            headers(("authorization" = String, description = "Session token"))),
        (status = 400, description = "Validation failed, unknown user or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInRequest>,
) -> Result<Response, AppError> {
    let token =
        UserService::authenticate(&state.db, &dto.email, &dto.password, &state.session).await?;

    let body = SessionResponse {
        token: token.clone(),
        expires_in: state.session.expiry(),
    };

    Ok(([(SESSION_HEADER, token)], Json(body)).into_response())
}
