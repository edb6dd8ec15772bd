//! Role resolution from the roster and role-service signals.

use std::sync::Arc;

use facility_auth_tokens::{Role, UserNumber};

use crate::error::RosterError;
use crate::providers::{RoleService, Roster};

/// Combines the local roster and the remote role service into a single
/// role decision.
///
/// Invoked fresh on every token mint: no cache, no retry, one
/// best-effort attempt per signal per call.
#[derive(Clone)]
pub struct RoleResolver {
    roster: Arc<dyn Roster>,
    role_service: Arc<dyn RoleService>,
}

impl RoleResolver {
    /// Creates a resolver over the two signal sources.
    #[must_use]
    pub fn new(roster: Arc<dyn Roster>, role_service: Arc<dyn RoleService>) -> Self {
        Self {
            roster,
            role_service,
        }
    }

    /// Resolves the role for a user number.
    ///
    /// The two signals are queried concurrently and combined with a
    /// logical OR; there is no precedence between them. A role-service
    /// failure degrades that signal to `false`: a remote outage
    /// reduces privilege rather than blocking resolution.
    ///
    /// # Errors
    ///
    /// Fails only when the staff roster itself cannot be queried.
    pub async fn resolve(&self, user_number: UserNumber) -> Result<Role, RosterError> {
        let (staff, scientist) = tokio::join!(
            self.roster.is_staff(user_number),
            self.role_service.is_instrument_scientist(user_number),
        );

        let scientist = match scientist {
            Ok(designated) => designated,
            Err(err) => {
                tracing::warn!(
                    user_number = %user_number,
                    error = %err,
                    "role service unavailable; degrading to roster signal"
                );
                false
            }
        };

        if staff? || scientist {
            Ok(Role::Staff)
        } else {
            Ok(Role::User)
        }
    }
}
