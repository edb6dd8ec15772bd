//! Access token lifecycle.
//!
//! An access token is the short-lived bearer credential carrying the
//! caller's identity and resolved role. It is minted at login, verified
//! on every check, and re-stamped in place on refresh. Loading
//! deliberately skips the expiry check so that the refresh flow can
//! inspect a token before deciding its fate; `refresh` re-verifies with
//! expiry enforced, so a lapsed token is never silently revived.

use chrono::{Duration, Utc};

use crate::claims::AccessClaims;
use crate::codec::TokenCodec;
use crate::error::TokenError;

/// A signed access token together with its decoded claims.
#[derive(Debug, Clone)]
pub struct AccessToken {
    claims: AccessClaims,
    encoded: String,
}

impl AccessToken {
    /// Mints a new access token by signing freshly-built claims.
    ///
    /// # Errors
    ///
    /// Returns an error only if the claims cannot be serialized.
    pub fn mint(codec: &TokenCodec, claims: AccessClaims) -> Result<Self, TokenError> {
        let encoded = codec.sign(&claims)?;
        Ok(Self { claims, encoded })
    }

    /// Loads an access token from its compact form without checking
    /// expiry.
    ///
    /// An expired token loads successfully so that the refresh flow can
    /// act on it; [`AccessToken::verify`] remains the expiry gate.
    ///
    /// # Errors
    ///
    /// Fails if the string is malformed, the signature does not verify,
    /// or the `exp` claim is missing.
    pub fn load(codec: &TokenCodec, encoded: &str) -> Result<Self, TokenError> {
        let claims = codec.decode::<AccessClaims>(encoded, false)?;
        Ok(Self {
            claims,
            encoded: encoded.to_owned(),
        })
    }

    /// Verifies the held token string, expiry included.
    ///
    /// This is the sole gate for the verify use case.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, a bad signature, or an expired token.
    pub fn verify(&self, codec: &TokenCodec) -> Result<(), TokenError> {
        codec.decode::<AccessClaims>(&self.encoded, true).map(|_| ())
    }

    /// Extends the token's validity by re-stamping `exp` and re-signing.
    ///
    /// Verification runs first with expiry enforced: a token that has
    /// already lapsed (or fails verification for any other reason)
    /// propagates the error and is left untouched. Subject, role, and
    /// username are preserved.
    ///
    /// # Errors
    ///
    /// Fails if verification fails or the re-signed claims cannot be
    /// serialized.
    pub fn refresh(&mut self, codec: &TokenCodec, ttl: Duration) -> Result<(), TokenError> {
        self.verify(codec)?;
        self.claims.exp = (Utc::now() + ttl).timestamp();
        self.encoded = codec.sign(&self.claims)?;
        Ok(())
    }

    /// Returns the decoded claims.
    #[must_use]
    pub fn claims(&self) -> &AccessClaims {
        &self.claims
    }

    /// Returns the compact signed form.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Consumes the token, returning the compact signed form.
    #[must_use]
    pub fn into_encoded(self) -> String {
        self.encoded
    }
}
