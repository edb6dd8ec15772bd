//! HTTP error mapping.
//!
//! Every authentication-kind failure (bad credentials, provider
//! trouble, malformed or expired or forged tokens, a missing refresh
//! cookie) collapses into a single generic `403` at the boundary. The
//! precise cause is recorded in the logs only: callers cannot probe
//! which check rejected them, and upstream detail never leaks.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use facility_auth_access::{AllocationsError, AuthenticationError};

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A login, verify, or refresh use case failed.
    Authentication(AuthenticationError),
    /// The internal API key was missing or wrong.
    Forbidden,
    /// The proposal-allocations lookup failed.
    Allocations(AllocationsError),
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        Self::Authentication(err)
    }
}

impl From<AllocationsError> for ApiError {
    fn from(err: AllocationsError) -> Self {
        Self::Allocations(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Authentication(err) => {
                tracing::warn!(error = %err, "authentication failed");
                forbidden()
            }
            Self::Forbidden => {
                tracing::warn!("request presented a missing or invalid internal API key");
                forbidden()
            }
            Self::Allocations(err) => {
                tracing::error!(error = %err, "allocations lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"message": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(serde_json::json!({"message": "Forbidden"})),
    )
        .into_response()
}
