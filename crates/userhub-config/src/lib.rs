//! # userhub Config
//!
//! Configuration types for the userhub API, loaded from environment variables.
//! Every `from_env` falls back to a development default except
//! [`DatabaseConfig`] and [`SessionConfig`], whose URL and secret are
//! mandatory.
//!
//! - [`server`]: bind address
//! - [`database`]: PostgreSQL connection settings
//! - [`session`]: session token signing secret and lifetime
//! - [`validation`]: organisation e-mail pattern
//! - [`cors`]: allowed origins
//!
//! # Example
//!
//! ```ignore
//! use userhub_config::{SessionConfig, ValidationConfig};
//!
//! userhub_config::load_dotenv();
//! let session = SessionConfig::from_env().expect("SESSION_SECRET must be set");
//! let validation = ValidationConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;
pub mod session;
pub mod validation;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
pub use validation::ValidationConfig;

/// Loads `.env` from the working directory if present.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
