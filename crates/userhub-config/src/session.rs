//! Session token signing settings.
//!
//! # Environment Variables
//!
//! - `SESSION_SECRET`: HMAC signing key (required, must not be blank)
//! - `SESSION_EXPIRY`: token lifetime in seconds (default: 86400)

use std::env;

use crate::env_or;

pub const DEFAULT_SESSION_EXPIRY: i64 = 86400; // 1 day

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub expiry: i64,
}

impl SessionConfig {
    /// Returns `None` when `SESSION_SECRET` is unset or blank.
    pub fn from_env() -> Option<Self> {
        Self::from_secret(
            env::var("SESSION_SECRET").ok(),
            env_or("SESSION_EXPIRY", DEFAULT_SESSION_EXPIRY),
        )
    }

    pub fn from_secret(secret: Option<String>, expiry: i64) -> Option<Self> {
        let secret = secret.filter(|s| !s.trim().is_empty())?;
        Some(Self { secret, expiry })
    }
}
