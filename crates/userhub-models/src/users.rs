//! User domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use userhub_core::validation::{FieldRule, RequestSchema, Schema, ValidationRules};
use userhub_core::{PaginationMeta, PaginationParams};
use utoipa::ToSchema;
use uuid::Uuid;

/// A user as stored in the `users` table, minus the password hash.
///
/// The hash is only ever read by the sign-in query and is never serialized.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::Standard
        }
    }
}

/// What a user may do. Stored as the `is_admin` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Standard,
    Admin,
}

/// Body of `POST /users` and `POST /admin/users`.
#[derive(Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[schema(example = "Joe")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "joe.doe@wolox.com.ar")]
    pub email: String,
    #[schema(example = "password1234")]
    pub password: String,
}

impl std::fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl RequestSchema for CreateUserDto {
    fn schema(rules: &ValidationRules) -> Schema {
        Schema::new()
            .field(FieldRule::string("firstName").required())
            .field(FieldRule::string("lastName").required())
            .field(rules.email_field())
            .field(rules.password_field())
    }
}

/// Page of users returned by `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

impl PaginatedUsersResponse {
    pub fn new(data: Vec<User>, params: &PaginationParams, total: i64) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(params, total),
        }
    }
}
