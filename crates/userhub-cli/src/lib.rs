//! # userhub CLI
//!
//! Administrative helpers used by the `userhub-cli` binary: creating admin
//! accounts and seeding fake users for development.
//!
//! ## Usage
//!
//! ```ignore
//! use userhub_cli::seeder::{seed_users, SeedConfig};
//!
//! let report = seed_users(&pool, &SeedConfig::new(50)).await?;
//! ```

pub mod admin;
pub mod seeder;
