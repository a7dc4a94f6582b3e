use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures are split so callers can tell tampering, expiry and
/// garbage apart in diagnostics; all three mean "unauthorized" to end users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is malformed: {0}")]
    MalformedToken(String),
}
