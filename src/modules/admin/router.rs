use axum::{Router, middleware, routing::post};

use super::controller::create_admin_user;
use crate::middleware::role::require_admin;
use crate::state::AppState;

pub fn init_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users", post(create_admin_user))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
