//! Error types for token encoding and verification.

use std::fmt;

/// Errors from signing or decoding a session token.
///
/// Decode failures are classified so that callers can log the precise
/// cause while the HTTP boundary collapses them into a single generic
/// rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The string is not parseable as a signed token, or its claims do
    /// not match the expected shape.
    Malformed { reason: String },
    /// The signature does not verify against the configured key.
    BadSignature,
    /// The token's expiry instant is in the past.
    Expired,
    /// The mandatory `exp` claim is absent.
    MissingExpiry,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => {
                write!(f, "malformed token: {reason}")
            }
            Self::BadSignature => {
                write!(f, "token has a bad signature")
            }
            Self::Expired => {
                write!(f, "token has expired")
            }
            Self::MissingExpiry => {
                write!(f, "token is missing the exp claim")
            }
        }
    }
}

impl std::error::Error for TokenError {}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            // The only required claim is exp.
            ErrorKind::MissingRequiredClaim(_) => Self::MissingExpiry,
            _ => Self::Malformed {
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_includes_reason() {
        let err = TokenError::Malformed {
            reason: "unexpected segment count".to_string(),
        };
        assert!(err.to_string().contains("malformed token"));
        assert!(err.to_string().contains("unexpected segment count"));
    }

    #[test]
    fn bad_signature_display() {
        assert!(TokenError::BadSignature.to_string().contains("signature"));
    }

    #[test]
    fn expired_display() {
        assert!(TokenError::Expired.to_string().contains("expired"));
    }

    #[test]
    fn missing_expiry_display() {
        assert!(TokenError::MissingExpiry.to_string().contains("exp"));
    }
}
