//! Refresh token lifecycle.
//!
//! A refresh token is the long-lived rotation credential. It carries no
//! identity, because its sole job is to prove time-bounded continued
//! authorization, so its claim set is exactly `{exp}`. Unlike access
//! tokens, a refresh token that is malformed, badly signed, or expired
//! fails immediately at load time.

use chrono::Duration;

use crate::claims::RefreshClaims;
use crate::codec::TokenCodec;
use crate::error::TokenError;

/// A signed refresh token together with its decoded claims.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    claims: RefreshClaims,
    encoded: String,
}

impl RefreshToken {
    /// Mints a new refresh token expiring `ttl` from now.
    ///
    /// There is no unbound state: a refresh token has no identity to
    /// wait for, so it is signed immediately.
    ///
    /// # Errors
    ///
    /// Returns an error only if the claims cannot be serialized.
    pub fn mint(codec: &TokenCodec, ttl: Duration) -> Result<Self, TokenError> {
        let claims = RefreshClaims::new(ttl);
        let encoded = codec.sign(&claims)?;
        Ok(Self { claims, encoded })
    }

    /// Loads a refresh token from its compact form, expiry included.
    ///
    /// # Errors
    ///
    /// Fails if the string is malformed, the signature does not verify,
    /// the `exp` claim is missing, or the token has expired.
    pub fn load(codec: &TokenCodec, encoded: &str) -> Result<Self, TokenError> {
        let claims = codec.decode::<RefreshClaims>(encoded, true)?;
        Ok(Self {
            claims,
            encoded: encoded.to_owned(),
        })
    }

    /// Re-asserts the load-time check before the token is used.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, a bad signature, or an expired token.
    pub fn verify(&self, codec: &TokenCodec) -> Result<(), TokenError> {
        codec.decode::<RefreshClaims>(&self.encoded, true).map(|_| ())
    }

    /// Returns the decoded claims.
    #[must_use]
    pub fn claims(&self) -> &RefreshClaims {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret")
    }

    #[test]
    fn minted_token_loads_and_verifies() {
        let codec = codec();
        let token = RefreshToken::mint(&codec, Duration::hours(12)).expect("mint");

        let loaded = RefreshToken::load(&codec, token.encoded()).expect("load");

        assert!(loaded.verify(&codec).is_ok());
        assert_eq!(loaded.claims(), token.claims());
    }

    #[test]
    fn claims_carry_no_identity() {
        let codec = codec();
        let token = RefreshToken::mint(&codec, Duration::hours(12)).expect("mint");

        let value: serde_json::Value = codec.decode(token.encoded(), false).expect("decode");
        let object = value.as_object().expect("object");

        assert_eq!(object.len(), 1);
        assert!(object.contains_key("exp"));
        assert!(!object.contains_key("usernumber"));
        assert!(!object.contains_key("role"));
    }

    #[test]
    fn load_rejects_an_expired_token() {
        let codec = codec();
        let expired = RefreshClaims {
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let encoded = codec.sign(&expired).expect("sign");

        let result = RefreshToken::load(&codec, &encoded);

        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn load_rejects_a_foreign_signature() {
        let foreign = RefreshToken::mint(&TokenCodec::new("other-secret"), Duration::hours(12))
            .expect("mint");

        let result = RefreshToken::load(&codec(), foreign.encoded());

        assert_eq!(result.unwrap_err(), TokenError::BadSignature);
    }

    #[test]
    fn load_rejects_garbage() {
        let result = RefreshToken::load(&codec(), "definitely.not.a-token");

        assert!(matches!(result.unwrap_err(), TokenError::Malformed { .. }));
    }
}
