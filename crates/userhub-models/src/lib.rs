//! # userhub Models
//!
//! Domain models and DTOs for the userhub API.
//!
//! - [`users`]: the user entity, its role, and the create/list DTOs
//! - [`auth`]: sign-in request and session response
//!
//! Every request DTO implements [`userhub_core::RequestSchema`], so the HTTP
//! layer can validate raw JSON against it before deserializing.

pub mod auth;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{SessionResponse, SignInRequest};
pub use users::{CreateUserDto, PaginatedUsersResponse, Role, User};
