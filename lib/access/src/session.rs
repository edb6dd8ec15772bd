//! Session use cases: login, verify, and refresh.
//!
//! The service owns the token codec and lifetimes plus the injected
//! collaborators. Everything here is stateless across requests: tokens
//! are self-contained, and no session record is kept server-side.

use std::sync::Arc;

use chrono::Duration;
use facility_auth_tokens::{AccessClaims, AccessToken, RefreshToken, TokenCodec};

use crate::error::AuthenticationError;
use crate::identity::Credentials;
use crate::providers::IdentityExchange;
use crate::resolver::RoleResolver;

/// Freshly-minted access and refresh tokens, in compact form.
///
/// The two lifetimes are unrelated: the access token is short-lived and
/// carries identity; the refresh token is long-lived and carries none.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Access token, returned in the response body.
    pub access_token: String,
    /// Refresh token, emitted as a protected cookie.
    pub refresh_token: String,
}

/// Orchestrates the token lifecycle for the HTTP surface.
#[derive(Clone)]
pub struct SessionService {
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
    identity: Arc<dyn IdentityExchange>,
    resolver: RoleResolver,
}

impl SessionService {
    /// Creates the session service.
    #[must_use]
    pub fn new(
        codec: TokenCodec,
        access_ttl: Duration,
        refresh_ttl: Duration,
        identity: Arc<dyn IdentityExchange>,
        resolver: RoleResolver,
    ) -> Self {
        Self {
            codec,
            access_ttl,
            refresh_ttl,
            identity,
            resolver,
        }
    }

    /// Exchanges credentials for a fresh token pair.
    ///
    /// The role is resolved anew on every login: a promotion or
    /// demotion takes effect on the next mint, never retroactively for
    /// tokens already issued.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthenticationError::BadCredentials`] and
    /// [`AuthenticationError::IdentityProvider`] from the credential
    /// exchange, and fails with [`AuthenticationError::RoleResolution`]
    /// when the staff roster cannot be queried.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, AuthenticationError> {
        let identity = self.identity.authenticate(credentials).await?;

        let role = self
            .resolver
            .resolve(identity.user_number)
            .await
            .map_err(|err| AuthenticationError::RoleResolution {
                reason: err.to_string(),
            })?;

        tracing::info!(
            user_number = %identity.user_number,
            role = %role,
            "resolved role; minting token pair"
        );

        let claims = AccessClaims::new(
            identity.user_number,
            role,
            identity.display_name,
            self.access_ttl,
        );
        let access = AccessToken::mint(&self.codec, claims)?;
        let refresh = RefreshToken::mint(&self.codec, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token: access.into_encoded(),
            refresh_token: refresh.into_encoded(),
        })
    }

    /// Verifies that an access token was issued by this service and has
    /// not expired.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthenticationError::BadToken`] on any decode or
    /// verification failure.
    pub fn verify_access_token(&self, token: &str) -> Result<(), AuthenticationError> {
        let access = AccessToken::load(&self.codec, token)?;
        access.verify(&self.codec)?;
        Ok(())
    }

    /// Reissues an access token under a still-valid refresh token.
    ///
    /// The access token is loaded without an expiry check, but its
    /// `refresh` re-verifies with expiry enforced, so an access token
    /// that has already lapsed cannot be revived here. The refresh
    /// token must itself decode and verify, expiry included.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthenticationError::MissingRefreshToken`] when no
    /// cookie accompanied the request, before any token is inspected,
    /// and with [`AuthenticationError::BadToken`] when either token is
    /// malformed, badly signed, or expired.
    pub fn refresh_access_token(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<String, AuthenticationError> {
        let refresh_token = refresh_token.ok_or(AuthenticationError::MissingRefreshToken)?;

        let mut access = AccessToken::load(&self.codec, access_token)?;
        let refresh = RefreshToken::load(&self.codec, refresh_token)?;
        refresh.verify(&self.codec)?;

        access.refresh(&self.codec, self.access_ttl)?;

        tracing::info!("access token refreshed");
        Ok(access.into_encoded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RoleServiceError, RosterError};
    use crate::identity::Identity;
    use crate::providers::{RoleService, Roster};
    use async_trait::async_trait;
    use facility_auth_tokens::{RefreshClaims, Role, TokenError, UserNumber};
    use chrono::Utc;

    const TEST_SECRET: &str = "test-secret";

    struct FakeIdentityExchange(Result<Identity, AuthenticationError>);

    #[async_trait]
    impl IdentityExchange for FakeIdentityExchange {
        async fn authenticate(
            &self,
            _credentials: &Credentials,
        ) -> Result<Identity, AuthenticationError> {
            self.0.clone()
        }
    }

    struct FakeRoster(Result<bool, RosterError>);

    #[async_trait]
    impl Roster for FakeRoster {
        async fn is_staff(&self, _user_number: UserNumber) -> Result<bool, RosterError> {
            self.0.clone()
        }
    }

    struct FakeRoleService(Result<bool, RoleServiceError>);

    #[async_trait]
    impl RoleService for FakeRoleService {
        async fn is_instrument_scientist(
            &self,
            _user_number: UserNumber,
        ) -> Result<bool, RoleServiceError> {
            self.0.clone()
        }
    }

    fn identity() -> Identity {
        Identity {
            user_number: UserNumber::new(1234),
            display_name: "A. Scientist".to_string(),
        }
    }

    fn service_with(
        identity_result: Result<Identity, AuthenticationError>,
        roster: Result<bool, RosterError>,
        role_service: Result<bool, RoleServiceError>,
    ) -> SessionService {
        SessionService::new(
            TokenCodec::new(TEST_SECRET),
            Duration::minutes(10),
            Duration::hours(12),
            Arc::new(FakeIdentityExchange(identity_result)),
            RoleResolver::new(
                Arc::new(FakeRoster(roster)),
                Arc::new(FakeRoleService(role_service)),
            ),
        )
    }

    fn service() -> SessionService {
        service_with(Ok(identity()), Ok(false), Ok(false))
    }

    fn credentials() -> Credentials {
        Credentials::new("scientist@example.com", "hunter2")
    }

    #[tokio::test]
    async fn login_mints_a_user_token_pair() {
        let service = service();

        let pair = service.login(&credentials()).await.expect("login");

        let codec = TokenCodec::new(TEST_SECRET);
        let claims: AccessClaims = codec.decode(&pair.access_token, true).expect("decode");
        assert_eq!(claims.usernumber, UserNumber::new(1234));
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.username, "A. Scientist");
    }

    #[tokio::test]
    async fn login_assigns_staff_from_the_roster_signal() {
        let service = service_with(Ok(identity()), Ok(true), Ok(false));

        let pair = service.login(&credentials()).await.expect("login");

        let codec = TokenCodec::new(TEST_SECRET);
        let claims: AccessClaims = codec.decode(&pair.access_token, true).expect("decode");
        assert_eq!(claims.role, Role::Staff);
    }

    #[tokio::test]
    async fn login_assigns_staff_from_the_role_service_signal() {
        let service = service_with(Ok(identity()), Ok(false), Ok(true));

        let pair = service.login(&credentials()).await.expect("login");

        let codec = TokenCodec::new(TEST_SECRET);
        let claims: AccessClaims = codec.decode(&pair.access_token, true).expect("decode");
        assert_eq!(claims.role, Role::Staff);
    }

    #[tokio::test]
    async fn login_refresh_token_carries_no_identity() {
        let service = service();

        let pair = service.login(&credentials()).await.expect("login");

        let codec = TokenCodec::new(TEST_SECRET);
        let value: serde_json::Value = codec.decode(&pair.refresh_token, true).expect("decode");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("exp"));
    }

    #[tokio::test]
    async fn login_propagates_bad_credentials() {
        let service = service_with(
            Err(AuthenticationError::BadCredentials),
            Ok(false),
            Ok(false),
        );

        let result = service.login(&credentials()).await;

        assert_eq!(result.unwrap_err(), AuthenticationError::BadCredentials);
    }

    #[tokio::test]
    async fn login_fails_when_the_roster_is_unavailable() {
        let service = service_with(
            Ok(identity()),
            Err(RosterError {
                reason: "connection refused".to_string(),
            }),
            Ok(false),
        );

        let result = service.login(&credentials()).await;

        assert!(matches!(
            result.unwrap_err(),
            AuthenticationError::RoleResolution { .. }
        ));
    }

    #[tokio::test]
    async fn verify_accepts_a_freshly_minted_token() {
        let service = service();
        let pair = service.login(&credentials()).await.expect("login");

        assert!(service.verify_access_token(&pair.access_token).is_ok());
    }

    #[test]
    fn verify_rejects_a_token_signed_under_another_secret() {
        let service = service();
        let foreign_codec = TokenCodec::new("another-secret");
        let claims = AccessClaims::new(
            UserNumber::new(1234),
            Role::User,
            "A. Scientist",
            Duration::minutes(10),
        );
        let foreign = AccessToken::mint(&foreign_codec, claims).expect("mint");

        let result = service.verify_access_token(foreign.encoded());

        assert_eq!(
            result.unwrap_err(),
            AuthenticationError::BadToken(TokenError::BadSignature)
        );
    }

    #[test]
    fn refresh_requires_the_cookie() {
        let service = service();
        let codec = TokenCodec::new(TEST_SECRET);
        let claims = AccessClaims::new(
            UserNumber::new(1234),
            Role::User,
            "A. Scientist",
            Duration::minutes(10),
        );
        let access = AccessToken::mint(&codec, claims).expect("mint");

        let result = service.refresh_access_token(access.encoded(), None);

        assert_eq!(result.unwrap_err(), AuthenticationError::MissingRefreshToken);
    }

    #[test]
    fn refresh_reissues_the_access_token() {
        let service = service();
        let codec = TokenCodec::new(TEST_SECRET);
        // Stamped with a short lifetime so the reissued expiry is
        // strictly later.
        let claims = AccessClaims::new(
            UserNumber::new(1234),
            Role::Staff,
            "A. Scientist",
            Duration::seconds(60),
        );
        let access = AccessToken::mint(&codec, claims.clone()).expect("mint");
        let refresh = RefreshToken::mint(&codec, Duration::hours(12)).expect("mint");

        let reissued = service
            .refresh_access_token(access.encoded(), Some(refresh.encoded()))
            .expect("refresh");

        assert_ne!(reissued, access.encoded());
        let new_claims: AccessClaims = codec.decode(&reissued, true).expect("decode");
        assert!(new_claims.exp > claims.exp);
        assert_eq!(new_claims.usernumber, claims.usernumber);
        assert_eq!(new_claims.role, claims.role);
        assert_eq!(new_claims.username, claims.username);
    }

    #[test]
    fn refresh_rejects_an_expired_refresh_token() {
        let service = service();
        let codec = TokenCodec::new(TEST_SECRET);
        let access = AccessToken::mint(
            &codec,
            AccessClaims::new(
                UserNumber::new(1234),
                Role::User,
                "A. Scientist",
                Duration::minutes(10),
            ),
        )
        .expect("mint");
        let expired = codec
            .sign(&RefreshClaims {
                exp: (Utc::now() - Duration::hours(1)).timestamp(),
            })
            .expect("sign");

        let result = service.refresh_access_token(access.encoded(), Some(&expired));

        assert_eq!(
            result.unwrap_err(),
            AuthenticationError::BadToken(TokenError::Expired)
        );
    }

    #[test]
    fn refresh_rejects_an_expired_access_token() {
        let service = service();
        let codec = TokenCodec::new(TEST_SECRET);
        let lapsed = codec
            .sign(&AccessClaims::new(
                UserNumber::new(1234),
                Role::User,
                "A. Scientist",
                Duration::minutes(-5),
            ))
            .expect("sign");
        let refresh = RefreshToken::mint(&codec, Duration::hours(12)).expect("mint");

        let result = service.refresh_access_token(&lapsed, Some(refresh.encoded()));

        assert_eq!(
            result.unwrap_err(),
            AuthenticationError::BadToken(TokenError::Expired)
        );
    }
}
