use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use userhub_core::{PaginationMeta, PaginationParams};
use userhub_models::{CreateUserDto, PaginatedUsersResponse, SessionResponse, SignInRequest, User};

use crate::modules::ErrorResponse;
use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::list_users,
        crate::modules::auth::controller::sign_in,
        crate::modules::admin::controller::create_admin_user,
        crate::modules::health::controller::health,
    ),
    components(
        schemas(
            User,
            CreateUserDto,
            SignInRequest,
            SessionResponse,
            PaginatedUsersResponse,
            PaginationMeta,
            PaginationParams,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User registration and listing"),
        (name = "Authentication", description = "Session sign-in"),
        (name = "Admin", description = "Admin-only user management"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "userhub API",
        version = "0.1.0",
        description = "User registration, session sign-in and admin user management built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            // The raw token goes in `authorization`, without a scheme prefix.
            components.add_security_scheme(
                "session_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("authorization"))),
            )
        }
    }
}
