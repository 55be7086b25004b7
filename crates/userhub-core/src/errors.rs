//! Application error type and its HTTP rendering.
//!
//! Every handler returns `Result<_, AppError>`. An error carries the HTTP
//! status, a machine-readable [`InternalCode`] and either a single message or
//! the list of field [`Violation`]s produced by the validation pipeline.
//!
//! ```json
//! { "message": "E-mail 'joe@wolox.com.ar' already registered", "internal_code": "already_exists" }
//! ```

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::validation::Violation;

/// Discriminator returned as `internal_code` so clients can tell error classes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InternalCode {
    ValidationError,
    AlreadyExists,
    BadRequest,
    Unauthorized,
    Forbidden,
    DatabaseError,
    DefaultError,
}

impl InternalCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::AlreadyExists => "already_exists",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::DatabaseError => "database_error",
            Self::DefaultError => "default_error",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub internal_code: InternalCode,
    pub error: Error,
    pub violations: Vec<Violation>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, internal_code: InternalCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            internal_code,
            error: err.into(),
            violations: Vec::new(),
        }
    }

    /// 400 carrying the ordered per-field violations.
    pub fn validation(violations: Vec<Violation>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            internal_code: InternalCode::ValidationError,
            error: anyhow::anyhow!("Request validation failed"),
            violations,
        }
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, InternalCode::BadRequest, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, InternalCode::AlreadyExists, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            InternalCode::Unauthorized,
            anyhow::anyhow!(message.into()),
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            InternalCode::Forbidden,
            anyhow::anyhow!(message.into()),
        )
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            InternalCode::DefaultError,
            err,
        )
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            InternalCode::DatabaseError,
            err,
        )
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {:#}", self.status, self.internal_code.as_str(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = if !self.violations.is_empty() {
            json!({
                "message": self.violations,
                "internal_code": self.internal_code,
            })
        } else if self.is_server_error() {
            // Server-side details stay in the logs.
            tracing::error!(
                status = %self.status.as_u16(),
                internal_code = self.internal_code.as_str(),
                error = %format!("{:#}", self.error),
                "Request failed"
            );
            json!({
                "message": "Internal server error",
                "internal_code": self.internal_code,
            })
        } else {
            json!({
                "message": self.error.to_string(),
                "internal_code": self.internal_code,
            })
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
