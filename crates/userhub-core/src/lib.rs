//! # userhub Core
//!
//! Core types, errors, and utilities for the userhub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`validation`]: Declarative, ordered request validation schemas
//! - [`pagination`]: Pagination parameters and response metadata
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use userhub_core::{AppError, Schema, FieldRule};
//!
//! let schema = Schema::new().field(FieldRule::string("firstName").required());
//! let dto: MyDto = schema.parse(body)?;
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, InternalCode};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use validation::{FieldRule, RequestSchema, Schema, ValidationRules, Violation};
