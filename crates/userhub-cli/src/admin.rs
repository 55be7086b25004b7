//! Admin account creation.

use serde_json::json;
use sqlx::PgPool;
use thiserror::Error;
use userhub_core::{RequestSchema, ValidationRules, hash_password};
use userhub_models::{CreateUserDto, User};

#[derive(Debug, Error)]
pub enum CreateAdminError {
    #[error("invalid input: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("a user with e-mail {0} already exists")]
    AlreadyExists(String),
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Validates the input with the same schema as `POST /users`, then inserts
/// the user with `is_admin = TRUE`. An existing e-mail is an error; existing
/// users are never promoted.
pub async fn create_admin(
    db: &PgPool,
    rules: &ValidationRules,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<User, CreateAdminError> {
    let raw = json!({
        "firstName": first_name,
        "lastName": last_name,
        "email": email,
        "password": password,
    });

    let dto: CreateUserDto = CreateUserDto::schema(rules).parse(raw).map_err(|e| {
        if e.violations.is_empty() {
            CreateAdminError::Invalid(vec![e.to_string()])
        } else {
            CreateAdminError::Invalid(e.violations.into_iter().map(|v| v.message).collect())
        }
    })?;

    let hashed_password =
        hash_password(&dto.password).map_err(|e| CreateAdminError::Hash(e.error.to_string()))?;

    sqlx::query_as::<_, User>(
        "INSERT INTO users (first_name, last_name, email, password, is_admin)
         VALUES ($1, $2, $3, $4, TRUE)
         ON CONFLICT (email) DO NOTHING
         RETURNING id, first_name, last_name, email, is_admin, created_at, updated_at",
    )
    .bind(&dto.first_name)
    .bind(&dto.last_name)
    .bind(&dto.email)
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?
    .ok_or(CreateAdminError::AlreadyExists(dto.email))
}
