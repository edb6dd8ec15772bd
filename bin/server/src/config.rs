//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables once at
//! process start. Nothing reads ambient environment state mid-request.

use chrono::Duration;
use serde::Deserialize;

/// Refresh tokens have a fixed 12-hour lifetime.
pub const REFRESH_TOKEN_LIFETIME_HOURS: i64 = 12;

/// Server configuration composed from the collaborator configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL connection URL for the staff roster.
    pub database_url: String,

    /// Process-wide symmetric secret used to sign session tokens.
    pub jwt_secret: String,

    /// API key guarding the internal experiments route.
    pub api_key: String,

    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Whether to set the Secure flag on the refresh cookie (requires
    /// HTTPS). Defaults to true; set to false for local HTTP
    /// development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// Token lifetime configuration.
    #[serde(default)]
    pub tokens: TokenConfig,

    /// User-office web service configuration (identity exchange and
    /// role lookups).
    pub uows: UowsConfig,

    /// Proposal-allocations endpoint configuration.
    pub allocations: AllocationsConfig,
}

/// Token lifetime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Access-token lifetime in minutes.
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: i64,
}

impl TokenConfig {
    /// Returns the access-token lifetime.
    #[must_use]
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_ttl_minutes)
    }

    /// Returns the refresh-token lifetime.
    #[must_use]
    pub fn refresh_ttl(&self) -> Duration {
        Duration::hours(REFRESH_TOKEN_LIFETIME_HOURS)
    }
}

fn default_access_ttl_minutes() -> i64 {
    10
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_ttl_minutes: default_access_ttl_minutes(),
        }
    }
}

/// User-office web service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UowsConfig {
    /// Base URL of the user-office web service.
    pub base_url: String,
    /// API key for the role endpoint.
    pub api_key: String,
}

/// Proposal-allocations endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationsConfig {
    /// GraphQL endpoint URL.
    pub url: String,
    /// API key expected by the allocations endpoint.
    pub api_key: String,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_config_has_correct_defaults() {
        let config = TokenConfig::default();
        assert_eq!(config.access_ttl_minutes, 10);
        assert_eq!(config.access_ttl(), Duration::minutes(10));
    }

    #[test]
    fn refresh_lifetime_is_fixed_at_twelve_hours() {
        let config = TokenConfig::default();
        assert_eq!(config.refresh_ttl(), Duration::hours(12));
    }
}
