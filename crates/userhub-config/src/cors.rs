//! Cross-origin settings for browser clients.
//!
//! # Environment Variables
//!
//! - `ALLOWED_ORIGINS`: comma-separated origins allowed to call the API and
//!   read the `authorization` response header (default: `http://localhost:3000`)

use std::env;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_list(DEFAULT_ALLOWED_ORIGINS)
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        env::var("ALLOWED_ORIGINS")
            .map(|list| Self::from_list(&list))
            .unwrap_or_default()
    }

    /// Parses a comma-separated origin list, dropping blanks and trailing slashes.
    pub fn from_list(list: &str) -> Self {
        let allowed_origins = list
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}
