//! Extractors that run the validation pipeline before a handler sees its input.
//!
//! Both read the raw input as untyped JSON, apply the DTO's
//! [`RequestSchema`] with the rules configured in [`AppState`], and only then
//! deserialize. Any failure short-circuits with a 400 `validation_error`.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde_json::{Map, Value};
use userhub_core::{AppError, RequestSchema, Violation};

use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: RequestSchema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let detail = match rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        "missing 'Content-Type: application/json' header"
                    }
                    JsonRejection::JsonSyntaxError(_) => "malformed JSON",
                    _ => "body could not be read",
                };
                AppError::validation(vec![Violation::unreadable_body(detail)])
            })?;

        let dto = T::schema(&state.validation_rules).parse(value)?;
        Ok(ValidatedJson(dto))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> FromRequestParts<AppState> for ValidatedQuery<T>
where
    T: RequestSchema,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|_| {
                AppError::validation(vec![Violation::unreadable_body("malformed query string")])
            })?;

        let object: Map<String, Value> = raw
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        let dto = T::schema(&state.validation_rules).parse(Value::Object(object))?;
        Ok(ValidatedQuery(dto))
    }
}
