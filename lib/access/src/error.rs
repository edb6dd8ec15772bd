//! Error types for the access crate.
//!
//! `AuthenticationError` covers the login/verify/refresh use cases;
//! the remaining types belong to individual upstream collaborators.
//! The HTTP boundary collapses all of these into generic responses, so
//! the variants exist for logs and tests rather than for callers.

use facility_auth_tokens::TokenError;
use std::fmt;

/// Errors from the authentication use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The identity provider rejected the supplied credentials.
    BadCredentials,
    /// The identity provider failed in any other way.
    IdentityProvider { reason: String },
    /// A role-resolution dependency failed fatally (staff roster).
    RoleResolution { reason: String },
    /// A token was malformed, badly signed, or expired.
    BadToken(TokenError),
    /// The refresh-token cookie was absent from the request.
    MissingRefreshToken,
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadCredentials => {
                write!(f, "invalid credentials provided to the identity provider")
            }
            Self::IdentityProvider { reason } => {
                write!(f, "identity provider error: {reason}")
            }
            Self::RoleResolution { reason } => {
                write!(f, "role resolution failed: {reason}")
            }
            Self::BadToken(err) => {
                write!(f, "bad token: {err}")
            }
            Self::MissingRefreshToken => {
                write!(f, "refresh token cookie is missing")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

impl From<TokenError> for AuthenticationError {
    fn from(err: TokenError) -> Self {
        Self::BadToken(err)
    }
}

/// Error from the authoritative staff-roster lookup.
///
/// Roster failures are fatal to the request that triggered them, unlike
/// role-service failures which degrade to a `false` signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterError {
    pub reason: String,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "staff roster lookup failed: {}", self.reason)
    }
}

impl std::error::Error for RosterError {}

/// Transport-level error from the remote role service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleServiceError {
    pub reason: String,
}

impl fmt::Display for RoleServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role service lookup failed: {}", self.reason)
    }
}

impl std::error::Error for RoleServiceError {}

/// Errors from the proposal-allocations lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationsError {
    /// The allocations endpoint could not be reached or answered with a
    /// non-success status.
    Transport { reason: String },
    /// The endpoint answered, but not in the expected shape.
    MalformedResponse { reason: String },
}

impl fmt::Display for AllocationsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => {
                write!(f, "allocations request failed: {reason}")
            }
            Self::MalformedResponse { reason } => {
                write!(f, "allocations response was malformed: {reason}")
            }
        }
    }
}

impl std::error::Error for AllocationsError {}
