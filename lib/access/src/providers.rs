//! Capability traits over the upstream collaborators.
//!
//! Each upstream dependency is modeled as a single-method trait so the
//! core flows can be exercised against fakes and survive upstream API
//! revisions. Implementations live in the server crate; everything here
//! is injected as `Arc<dyn _>`.

use async_trait::async_trait;
use facility_auth_tokens::UserNumber;

use crate::error::{AllocationsError, AuthenticationError, RoleServiceError, RosterError};
use crate::identity::{Credentials, Identity};

/// Exchanges login credentials for a verified identity.
#[async_trait]
pub trait IdentityExchange: Send + Sync {
    /// Authenticates the given credentials with the identity provider.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthenticationError::BadCredentials`] when the
    /// provider reports the credentials as unauthorized, and with
    /// [`AuthenticationError::IdentityProvider`] on any other
    /// non-success, including transport failure.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthenticationError>;
}

/// Authoritative staff-roster membership query.
#[async_trait]
pub trait Roster: Send + Sync {
    /// Returns whether the user number belongs to a staff member.
    ///
    /// Ambiguous lookups (more than one matching record) are an
    /// implementation-level anomaly: log and report not-staff.
    ///
    /// # Errors
    ///
    /// Fails when the roster store cannot be queried at all; such a
    /// failure is fatal to the request that needed the answer.
    async fn is_staff(&self, user_number: UserNumber) -> Result<bool, RosterError>;
}

/// Remote role-service designation query.
#[async_trait]
pub trait RoleService: Send + Sync {
    /// Returns whether the remote service lists an instrument-scientist
    /// designation for the user number.
    ///
    /// A well-formed "no" (including a non-success HTTP answer from the
    /// upstream) is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems (timeout, unreachable
    /// host); the caller degrades that to a `false` signal.
    async fn is_instrument_scientist(&self, user_number: UserNumber) -> Result<bool, RoleServiceError>;
}

/// Proposal-allocations lookup for the internal experiments route.
#[async_trait]
pub trait AllocationsService: Send + Sync {
    /// Returns the experiment (RB) numbers allocated to the user.
    ///
    /// # Errors
    ///
    /// Fails when the allocations endpoint is unreachable or answers in
    /// an unexpected shape.
    async fn experiments_for(&self, user_number: UserNumber) -> Result<Vec<i64>, AllocationsError>;
}
