//! Sign-in request and session response.

use serde::{Deserialize, Serialize};
use userhub_core::validation::{RequestSchema, Schema, ValidationRules};
use utoipa::ToSchema;

/// Body of `POST /users/sessions`. Names are not required here.
#[derive(Deserialize, Clone, ToSchema)]
pub struct SignInRequest {
    #[schema(example = "joe.doe@wolox.com.ar")]
    pub email: String,
    #[schema(example = "password1234")]
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl RequestSchema for SignInRequest {
    fn schema(rules: &ValidationRules) -> Schema {
        Schema::new()
            .field(rules.email_field())
            .field(rules.password_field())
    }
}

/// Returned on successful sign-in; the same token is set in the session header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    /// Lifetime of the token in seconds
    pub expires_in: i64,
}
