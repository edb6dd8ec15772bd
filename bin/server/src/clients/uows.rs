//! User-office web service client.
//!
//! The user-office service plays two collaborator roles: it is the
//! identity provider (credential exchange against the sessions
//! endpoint) and the remote role service (instrument-scientist
//! designation lookup). Both are single best-effort calls with
//! explicit timeouts and no retry.

use std::time::Duration;

use async_trait::async_trait;
use facility_auth_access::{
    AuthenticationError, Credentials, Identity, IdentityExchange, RoleService, RoleServiceError,
};
use facility_auth_tokens::UserNumber;
use reqwest::{StatusCode, header};
use serde::Deserialize;

use crate::config::UowsConfig;

/// The role lookup sits on the login hot path; a slow role service
/// must degrade the signal, not stall the login.
const SESSION_TIMEOUT: Duration = Duration::from_secs(30);
const ROLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Role designation that grants staff access.
const INSTRUMENT_SCIENTIST: &str = "ISIS Instrument Scientist";

/// Client for the user-office web service.
#[derive(Clone)]
pub struct UserOfficeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UserOfficeClient {
    /// Creates a client over a shared HTTP connection pool.
    #[must_use]
    pub fn new(http: reqwest::Client, config: UowsConfig) -> Self {
        Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct RoleEntry {
    name: String,
}

#[async_trait]
impl IdentityExchange for UserOfficeClient {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthenticationError> {
        let response = self
            .http
            .post(format!("{}/v0/sessions", self.base_url))
            .timeout(SESSION_TIMEOUT)
            .json(&serde_json::json!({
                "username": credentials.username,
                "password": credentials.password,
            }))
            .send()
            .await
            .map_err(|err| AuthenticationError::IdentityProvider {
                reason: err.to_string(),
            })?;

        match response.status() {
            StatusCode::CREATED => {
                let session: SessionResponse = response.json().await.map_err(|err| {
                    AuthenticationError::IdentityProvider {
                        reason: format!("unexpected session response: {err}"),
                    }
                })?;
                // The sessions endpoint only reports the user number;
                // the login name doubles as the display name.
                Ok(Identity {
                    user_number: UserNumber::new(session.user_id),
                    display_name: credentials.username.clone(),
                })
            }
            StatusCode::UNAUTHORIZED => Err(AuthenticationError::BadCredentials),
            status => Err(AuthenticationError::IdentityProvider {
                reason: format!("unexpected status {status} from the user office web service"),
            }),
        }
    }
}

#[async_trait]
impl RoleService for UserOfficeClient {
    async fn is_instrument_scientist(
        &self,
        user_number: UserNumber,
    ) -> Result<bool, RoleServiceError> {
        let response = self
            .http
            .get(format!("{}/v1/role/{user_number}", self.base_url))
            .header(header::AUTHORIZATION, format!("Api-key {}", self.api_key))
            .header(header::ACCEPT, "application/json")
            .timeout(ROLE_TIMEOUT)
            .send()
            .await
            .map_err(|err| RoleServiceError {
                reason: err.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            tracing::info!(
                user_number = %user_number,
                status = %response.status(),
                "user has no instrument-scientist designation"
            );
            return Ok(false);
        }

        let roles: Vec<RoleEntry> = response.json().await.map_err(|err| RoleServiceError {
            reason: format!("unexpected role response: {err}"),
        })?;

        Ok(roles.iter().any(|role| role.name == INSTRUMENT_SCIENTIST))
    }
}
