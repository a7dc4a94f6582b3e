use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Binds a subject to a role until an absolute expiry. Role is carried as
/// plain text so each service can map it onto its own role type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Access role of the subject
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued now and expiring at `expires_at`.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `role` - Role name carried by the token
    /// * `expires_at` - Absolute expiry (Unix timestamp)
    pub fn new(subject: impl ToString, role: impl ToString, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at,
        }
    }

    /// Create claims valid for `validity_seconds` from now.
    pub fn valid_for(subject: impl ToString, role: impl ToString, validity_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now.saturating_add(validity_seconds),
        }
    }
}
