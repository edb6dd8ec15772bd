//! Access decisions and session orchestration for the facility-access
//! API.
//!
//! This crate provides:
//! - Identity and credential models (`Identity`, `Credentials`)
//! - Capability traits over the upstream collaborators
//!   (`IdentityExchange`, `Roster`, `RoleService`, `AllocationsService`)
//! - Role resolution combining the roster and role-service signals
//!   (`RoleResolver`)
//! - The session use cases: login, verify, and refresh
//!   (`SessionService`)
//!
//! # Role Model
//!
//! A caller is `staff` if the authoritative roster lists their user
//! number OR the remote role service reports an instrument-scientist
//! designation for it; otherwise `user`. The role is recomputed at
//! every mint, so roster changes take effect on the next login rather
//! than retroactively. A role-service outage degrades that signal to
//! `false` instead of failing the request.

pub mod error;
pub mod identity;
pub mod providers;
pub mod resolver;
pub mod session;

// Re-export main types at crate root
pub use error::{AllocationsError, AuthenticationError, RoleServiceError, RosterError};
pub use identity::{Credentials, Identity};
pub use providers::{AllocationsService, IdentityExchange, RoleService, Roster};
pub use resolver::RoleResolver;
pub use session::{SessionService, TokenPair};
