//! Signing and decoding of compact session tokens.
//!
//! Tokens are JWTs signed with a single process-wide symmetric key
//! (HS256). The codec is a pure function over its input and the
//! configured secret: no clock state is kept here beyond the expiry
//! comparison `jsonwebtoken` performs during validation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::TokenError;

/// Encodes and decodes signed claim sets with the process-wide secret.
///
/// Constructed once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Creates a codec from the configured signing secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a claim set into its compact string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be serialized.
    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding_key).map_err(Into::into)
    }

    /// Decodes a compact token string back into its claim set.
    ///
    /// The `exp` claim must be present regardless of `verify_expiry`;
    /// when `verify_expiry` is set, an `exp` in the past fails with
    /// [`TokenError::Expired`]. Expiry is compared with zero leeway.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] for unparseable input or a
    /// mismatched claim shape, [`TokenError::BadSignature`] when the
    /// signature does not verify, [`TokenError::MissingExpiry`] when
    /// `exp` is absent, and [`TokenError::Expired`] as above.
    pub fn decode<C: DeserializeOwned>(
        &self,
        token: &str,
        verify_expiry: bool,
    ) -> Result<C, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;
        validation.validate_exp = verify_expiry;

        let data = jsonwebtoken::decode::<C>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}
