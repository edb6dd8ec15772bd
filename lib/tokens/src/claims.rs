//! Claim structures carried inside signed session tokens.
//!
//! Each token kind has an explicit claim struct, validated at
//! construction, so that the payload shape cannot drift between minting
//! and verification. Both structs carry `exp` as UTC seconds since the
//! epoch; access tokens additionally carry the subject's identity and
//! resolved role.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Facility-issued user identifier.
///
/// User numbers are opaque integers assigned by the user-office web
/// service; this service never generates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserNumber(i64);

impl UserNumber {
    /// Creates a user number from its integer form.
    #[must_use]
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    /// Returns the underlying integer.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserNumber {
    fn from(number: i64) -> Self {
        Self(number)
    }
}

/// Authorization role assigned to a caller.
///
/// Staff see all data; users see their own. The role is derived from the
/// user number at every mint and is never trusted from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standard facility user.
    User,
    /// Facility staff member.
    Staff,
}

impl Role {
    /// Returns true if this role grants staff access.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff)
    }

    /// Returns the role's wire form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by an access token.
///
/// Minted with `exp = now + ttl`; refreshing re-stamps `exp` and leaves
/// the identity claims untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject user number.
    pub usernumber: UserNumber,
    /// Role resolved for the subject at mint time.
    pub role: Role,
    /// Display name of the subject.
    pub username: String,
    /// Expiry instant, UTC seconds since the epoch.
    pub exp: i64,
}

impl AccessClaims {
    /// Builds access claims expiring `ttl` from now.
    #[must_use]
    pub fn new(usernumber: UserNumber, role: Role, username: impl Into<String>, ttl: Duration) -> Self {
        Self {
            usernumber,
            role,
            username: username.into(),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }
}

/// Claims carried by a refresh token.
///
/// A refresh token proves time-bounded continued authorization only, so
/// its claim set is exactly `{exp}`. Identity is re-derived from the
/// access token it is paired with at refresh time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Expiry instant, UTC seconds since the epoch.
    pub exp: i64,
}

impl RefreshClaims {
    /// Builds refresh claims expiring `ttl` from now.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            exp: (Utc::now() + ttl).timestamp(),
        }
    }
}
