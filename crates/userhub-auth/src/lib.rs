//! # userhub Auth
//!
//! Stateless session tokens for the userhub API.
//!
//! A session token is an HS256 JWT whose subject is the user's e-mail. It is
//! minted at sign-in, carried in the [`SESSION_HEADER`] header and verified on
//! every protected request. There is no server-side revocation list.
//!
//! - [`claims`]: the claim set embedded in a token
//! - [`session`]: [`SessionCodec`], the encode/decode pair
//!
//! # Example
//!
//! ```ignore
//! use userhub_auth::SessionCodec;
//! use userhub_config::SessionConfig;
//!
//! let codec = SessionCodec::new(&SessionConfig::from_env().expect("SESSION_SECRET must be set"));
//! let token = codec.encode("joe.doe@wolox.com.ar")?;
//! assert_eq!(codec.decode(&token)?, "joe.doe@wolox.com.ar");
//! ```

pub mod claims;
pub mod session;

// Re-export commonly used types at crate root
pub use claims::SessionClaims;
pub use session::{SESSION_HEADER, SessionCodec, TokenError, token_from_header};
