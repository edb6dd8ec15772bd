//! Implementations of the upstream collaborator traits.
//!
//! - [`UserOfficeClient`]: identity exchange and role lookups against
//!   the user-office web service
//! - [`StaffRoster`]: staff membership from the Postgres roster
//! - [`AllocationsClient`]: experiment numbers from the
//!   proposal-allocations GraphQL endpoint

pub mod allocations;
pub mod roster;
pub mod uows;

pub use allocations::AllocationsClient;
pub use roster::StaffRoster;
pub use uows::UserOfficeClient;
