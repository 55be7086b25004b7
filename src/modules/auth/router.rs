use axum::{Router, routing::post};

use super::controller::sign_in;
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/users/sessions", post(sign_in))
}
