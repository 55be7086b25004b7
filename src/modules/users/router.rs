use axum::{Router, middleware, routing::get};

use crate::middleware::role::require_session;
use crate::modules::users::controller::{create_user, list_users};
use crate::state::AppState;

pub fn init_users_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/users",
        get(list_users)
            .route_layer(middleware::from_fn_with_state(state, require_session))
            .post(create_user),
    )
}
