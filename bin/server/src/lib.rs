//! facility-auth HTTP server.
//!
//! This crate wires the token lifecycle and role resolution onto an
//! axum router, backed by the user-office web service, the Postgres
//! staff roster, and the proposal-allocations endpoint. Requests are
//! handled statelessly: the only cross-request state is the read-only
//! configuration captured in [`AppState`], the outbound HTTP client,
//! and the database pool.

pub mod clients;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use facility_auth_access::{AllocationsService, SessionService};

/// Shared application state.
pub struct AppState {
    /// Session use cases (login, verify, refresh).
    pub sessions: SessionService,
    /// Allocations lookup for the internal experiments route.
    pub allocations: Arc<dyn AllocationsService>,
    /// Internal API key guarding the experiments route.
    pub api_key: String,
    /// Whether the refresh cookie carries the Secure flag.
    pub secure_cookies: bool,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(
        sessions: SessionService,
        allocations: Arc<dyn AllocationsService>,
        api_key: String,
        secure_cookies: bool,
    ) -> Self {
        Self {
            sessions,
            allocations,
            api_key,
            secure_cookies,
        }
    }
}
