//! Caller identity and credential models.

use facility_auth_tokens::UserNumber;
use serde::Deserialize;

/// Credentials presented at login.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Facility account username.
    pub username: String,
    /// Facility account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username with all but its first three characters
    /// masked, for log lines.
    #[must_use]
    pub fn masked_username(&self) -> String {
        let prefix: String = self.username.chars().take(3).collect();
        format!("{prefix}****")
    }
}

// Credentials must never leak the password through debug formatting.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A verified caller identity, resolved once at login time.
///
/// Not persisted anywhere: it exists only long enough to be packed into
/// an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Facility-issued user number.
    pub user_number: UserNumber,
    /// Display name carried into the access token's `username` claim.
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_username_keeps_three_characters() {
        let credentials = Credentials::new("scientist@example.com", "hunter2");
        assert_eq!(credentials.masked_username(), "sci****");
    }

    #[test]
    fn masked_username_handles_short_names() {
        let credentials = Credentials::new("ab", "pw");
        assert_eq!(credentials.masked_username(), "ab****");
    }

    #[test]
    fn debug_redacts_password() {
        let credentials = Credentials::new("scientist", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("scientist"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
