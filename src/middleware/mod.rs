//! Middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: resolves the caller from the session header ([`AuthUser`])
//! - [`role`]: route layers enforcing a session or the admin role
//!
//! # Authentication Flow
//!
//! 1. Client sends the token minted at sign-in in the `authorization` header
//! 2. The token is decoded with the process-wide [`userhub_auth::SessionCodec`]
//! 3. The e-mail it carries is resolved to a stored user, else 401
//! 4. The user is cached in the request extensions for the handler
//!
//! ```ignore
//! Router::new()
//!     .route("/admin/users", post(create_admin_user))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```
//!
//! [`AuthUser`]: auth::AuthUser

pub mod auth;
pub mod role;
