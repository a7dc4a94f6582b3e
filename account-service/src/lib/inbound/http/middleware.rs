use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::inbound::http::handlers::ApiError;

/// Extension type to store the verified caller in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("role {actual} may not access a route requiring {required}")]
    Forbidden { required: Role, actual: Role },
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated(_) => ApiError::Unauthorized(err.to_string()),
            AccessError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Route guard state: token verifier plus the role a route requires, if any.
#[derive(Clone)]
pub struct AccessGate {
    authenticator: Arc<Authenticator>,
    required_role: Option<Role>,
}

impl AccessGate {
    /// Gate that accepts any verified session.
    pub fn any_role(authenticator: Arc<Authenticator>) -> Self {
        Self {
            authenticator,
            required_role: None,
        }
    }

    /// Gate that accepts only sessions carrying exactly `role`.
    pub fn require(authenticator: Arc<Authenticator>, role: Role) -> Self {
        Self {
            authenticator,
            required_role: Some(role),
        }
    }

    /// Resolve the caller from request headers and apply the role check.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<AuthenticatedAccount, AccessError> {
        let token = extract_bearer_token(headers)?;

        let claims = self.authenticator.verify_session(token).map_err(|e| {
            let kind = match e {
                JwtError::TokenExpired => "expired",
                JwtError::InvalidToken(_) => "invalid",
                JwtError::MalformedToken(_) => "malformed",
                JwtError::EncodingFailed(_) => "encoding",
            };
            tracing::warn!(kind, error = %e, "Session token rejected");
            AccessError::Unauthenticated("Invalid or expired token".to_string())
        })?;

        let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Session token subject is not an account id");
            AccessError::Unauthenticated("Invalid token format".to_string())
        })?;

        let role: Role = claims.role.parse().map_err(|e| {
            tracing::warn!(error = %e, "Session token carries an unknown role");
            AccessError::Unauthenticated("Invalid token format".to_string())
        })?;

        if let Some(required) = self.required_role {
            if role != required {
                tracing::warn!(
                    account_id = %account_id,
                    role = %role,
                    required = %required,
                    "Role check failed"
                );
                return Err(AccessError::Forbidden {
                    required,
                    actual: role,
                });
            }
        }

        Ok(AuthenticatedAccount { account_id, role })
    }
}

/// Middleware that verifies the bearer token and adds the caller to request extensions
pub async fn require_access(
    State(gate): State<AccessGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccessError> {
    let caller = gate.authorize(req.headers())?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AccessError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AccessError::Unauthenticated("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AccessError::Unauthenticated("Invalid Authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AccessError::Unauthenticated(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use auth::Claims;
    use axum::http::HeaderValue;
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    fn token_for(id: i64, role: &str) -> String {
        authenticator()
            .generate_token(&Claims::valid_for(id, role, 3600))
            .unwrap()
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let gate = AccessGate::any_role(authenticator());

        assert!(matches!(
            gate.authorize(&HeaderMap::new()),
            Err(AccessError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthenticated() {
        let gate = AccessGate::any_role(authenticator());
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert!(matches!(
            gate.authorize(&headers),
            Err(AccessError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_user_token_passes_user_gate() {
        let gate = AccessGate::require(authenticator(), Role::User);

        let caller = gate.authorize(&bearer(&token_for(7, "user"))).unwrap();

        assert_eq!(caller.account_id, AccountId(7));
        assert_eq!(caller.role, Role::User);
    }

    #[test]
    fn test_admin_token_forbidden_on_user_gate() {
        let gate = AccessGate::require(authenticator(), Role::User);

        assert_eq!(
            gate.authorize(&bearer(&token_for(1, "admin"))),
            Err(AccessError::Forbidden {
                required: Role::User,
                actual: Role::Admin,
            })
        );
    }

    #[test]
    fn test_any_role_gate_accepts_both_roles() {
        let gate = AccessGate::any_role(authenticator());

        assert!(gate.authorize(&bearer(&token_for(1, "admin"))).is_ok());
        assert!(gate.authorize(&bearer(&token_for(2, "user"))).is_ok());
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let gate = AccessGate::any_role(authenticator());
        let claims = Claims::new(1, "user", Utc::now().timestamp() - 60);
        let token = authenticator().generate_token(&claims).unwrap();

        assert!(matches!(
            gate.authorize(&bearer(&token)),
            Err(AccessError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_foreign_signature_is_unauthenticated() {
        let gate = AccessGate::any_role(authenticator());
        let other = Authenticator::new(b"another-secret-key-for-jwt-signing-32-bytes");
        let token = other
            .generate_token(&Claims::valid_for(1, "user", 3600))
            .unwrap();

        assert!(matches!(
            gate.authorize(&bearer(&token)),
            Err(AccessError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_unparseable_claims_are_unauthenticated() {
        let gate = AccessGate::any_role(authenticator());

        assert!(matches!(
            gate.authorize(&bearer(&token_for(1, "superuser"))),
            Err(AccessError::Unauthenticated(_))
        ));

        let token = authenticator()
            .generate_token(&Claims::valid_for("not-a-number", "user", 3600))
            .unwrap();
        assert!(matches!(
            gate.authorize(&bearer(&token)),
            Err(AccessError::Unauthenticated(_))
        ));
    }
}
