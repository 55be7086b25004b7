use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, instrument};
use userhub_core::AppError;
use userhub_models::{CreateUserDto, User};

use crate::middleware::auth::AuthUser;
use crate::modules::ErrorResponse;
use crate::modules::users::service::{Ensured, UserService};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a user as an admin
///
/// Unlike `POST /users`, an e-mail that is already registered is not a
/// conflict: the existing user is returned unchanged with 200.
#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 200, description = "User already existed", body = User),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("session_token" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state, admin), fields(admin = %admin.email()))]
pub async fn create_admin_user(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    match UserService::ensure_user(&state.db, dto).await? {
        Ensured::Created(user) => Ok((StatusCode::CREATED, Json(user))),
        Ensured::Existing(user) => {
            info!(user_id = %user.id, "Admin create hit an existing user");
            Ok((StatusCode::OK, Json(user)))
        }
    }
}
