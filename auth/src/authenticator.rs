use serde::Deserialize;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Password checks and session tokens behind one signing secret.
///
/// Built once at startup and shared read-only between request handlers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Token issued after a password check passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// `jwt_secret` signs and verifies every token this instance handles.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Salted Argon2id digest of `password`, ready for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Sign `claims` only if `password` matches `stored_hash`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match; nothing is signed
    /// * `JwtError` - Signing failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Sign arbitrary claims without a password check.
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Decode a token into caller-chosen claims after signature and expiry checks.
    pub fn validate_token<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Decode a session token into its subject and role.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature or algorithm mismatch
    /// * `TokenExpired` - `exp` is in the past
    /// * `MalformedToken` - Not a JWT, or the session claims are missing
    pub fn verify_session(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let claims = Claims::valid_for(123, "user", 3600);
        let result = authenticator
            .authenticate(password, &hash, &claims)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded: Claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "123");
        assert_eq!(decoded.role, "user");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("")
            .expect("Failed to hash password");

        let claims = Claims::valid_for(123, "user", 3600);

        let result = authenticator.authenticate("x", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_against_corrupt_hash() {
        let authenticator = Authenticator::new(SECRET);
        assert!(!authenticator.verify_password("anything", "$argon2id$garbage"));
    }

    #[test]
    fn test_verify_session_requires_role_claim() {
        #[derive(Serialize)]
        struct Bare {
            sub: String,
            exp: i64,
        }

        let authenticator = Authenticator::new(SECRET);
        let token = authenticator
            .generate_token(&Bare {
                sub: "1".to_string(),
                exp: chrono::Utc::now().timestamp() + 60,
            })
            .expect("Failed to generate token");

        assert!(matches!(
            authenticator.verify_session(&token),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_rotated_secret_rejects_old_tokens() {
        let old = Authenticator::new(b"old_secret_key_at_least_32_bytes!!");
        let new = Authenticator::new(b"new_secret_key_at_least_32_bytes!!");

        let token = old
            .generate_token(&Claims::valid_for(1, "admin", 3600))
            .expect("Failed to generate token");

        let result = new.validate_token::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
