//! Session token encoding and verification.
//!
//! [`SessionCodec`] is built once at startup from [`SessionConfig`] and shared
//! read-only. Both operations are pure: no I/O, no mutable state.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use userhub_config::SessionConfig;

use crate::claims::SessionClaims;

/// Header carrying the session token, in both directions.
pub const SESSION_HEADER: &str = "authorization";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("session token has expired")]
    Expired,
    #[error("session token signature does not verify")]
    InvalidSignature,
    #[error("malformed session token: {0}")]
    Malformed(String),
    #[error("failed to encode session token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: i64,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl SessionCodec {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            expiry: config.expiry,
        }
    }

    pub fn expiry(&self) -> i64 {
        self.expiry
    }

    /// Mints a token whose subject is `email`.
    pub fn encode(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: email.to_string(),
            iat: now,
            exp: now + self.expiry,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies signature and expiry and returns the full claim set.
    pub fn decode_claims(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verifies `token` and returns the e-mail it was minted for.
    pub fn decode(&self, token: &str) -> Result<String, TokenError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }
}

/// Extracts the raw token from a header value, tolerating a `Bearer ` prefix.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}
