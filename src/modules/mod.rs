use serde::Serialize;
use utoipa::ToSchema;

pub mod admin;
pub mod auth;
pub mod health;
pub mod users;

/// Error body shared by every endpoint.
///
/// `message` is a string, or for `validation_error` the ordered list of
/// violations.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(value_type = Object)]
    pub message: serde_json::Value,
    pub internal_code: String,
}
