//! Staff roster backed by the Postgres `staff` table.

use async_trait::async_trait;
use facility_auth_access::{Roster, RosterError};
use facility_auth_tokens::UserNumber;
use sqlx::PgPool;

/// Authoritative staff roster.
#[derive(Clone)]
pub struct StaffRoster {
    pool: PgPool,
}

impl StaffRoster {
    /// Creates a roster over the shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Roster for StaffRoster {
    async fn is_staff(&self, user_number: UserNumber) -> Result<bool, RosterError> {
        let matches: Vec<i64> =
            sqlx::query_scalar("SELECT user_number FROM staff WHERE user_number = $1")
                .bind(user_number.as_i64())
                .fetch_all(&self.pool)
                .await
                .map_err(|err| RosterError {
                    reason: err.to_string(),
                })?;

        match matches.len() {
            0 => Ok(false),
            1 => Ok(true),
            found => {
                // One row per staff member is a table invariant; more
                // than one means the table needs attention, so the
                // signal fails closed.
                tracing::warn!(
                    user_number = %user_number,
                    found,
                    "multiple staff rows for user number; treating as not staff"
                );
                Ok(false)
            }
        }
    }
}
