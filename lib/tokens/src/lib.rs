//! Signed session tokens for the facility-access API.
//!
//! This crate provides:
//! - Explicit claim structures per token kind (`AccessClaims`,
//!   `RefreshClaims`), plus the `Role` and `UserNumber` value types
//! - A symmetric-key codec over the compact JWT form (`TokenCodec`)
//! - The access-token state machine (`AccessToken`: mint, load, verify,
//!   refresh) and the refresh-token state machine (`RefreshToken`:
//!   mint, load, verify)
//!
//! Tokens are self-contained and stateless: the server keeps no copy,
//! and the only process-wide state involved is the signing secret.
//!
//! # Example
//!
//! ```
//! use facility_auth_tokens::{AccessClaims, AccessToken, Role, TokenCodec, UserNumber};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new("process-secret");
//!
//! let claims = AccessClaims::new(
//!     UserNumber::new(1234),
//!     Role::User,
//!     "A. Scientist",
//!     Duration::minutes(10),
//! );
//! let token = AccessToken::mint(&codec, claims).expect("mint");
//!
//! assert!(token.verify(&codec).is_ok());
//! ```

pub mod access;
pub mod claims;
pub mod codec;
pub mod error;
pub mod refresh;

// Re-export main types at crate root
pub use access::AccessToken;
pub use claims::{AccessClaims, RefreshClaims, Role, UserNumber};
pub use codec::TokenCodec;
pub use error::TokenError;
pub use refresh::RefreshToken;
