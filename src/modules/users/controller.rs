use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use userhub_core::{AppError, PaginationParams};
use userhub_models::{CreateUserDto, PaginatedUsersResponse, User};

use crate::middleware::auth::AuthUser;
use crate::modules::ErrorResponse;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "E-mail already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users (requires a session)
#[utoipa::path(
    get,
    path = "/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersResponse),
        (status = 400, description = "Invalid pagination parameters", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("session_token" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(caller = %auth_user.email()))]
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let page = UserService::list_users(&state.db, &params).await?;
    Ok(Json(page))
}
