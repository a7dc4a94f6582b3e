//! Credential and session primitives for the account service.
//!
//! [`PasswordHasher`] stores passwords as salted Argon2id digests,
//! [`VerificationCodeGenerator`] draws numeric one-time codes from the OS RNG,
//! and [`JwtHandler`] signs HS256 session tokens. [`Authenticator`] ties the
//! hasher and the token handler to one signing secret.
//!
//! Roles travel through tokens as plain strings; the service maps them onto
//! its own role type.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Verification Codes
//! ```
//! use auth::VerificationCodeGenerator;
//!
//! let code = VerificationCodeGenerator::new(6).generate();
//! assert_eq!(code.len(), 6);
//! ```
//!
//! ## Login
//! ```
//! use auth::{Authenticator, Claims, JwtError};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let stored = auth.hash_password("").unwrap();
//!
//! // A wrong password never produces a token
//! let claims = Claims::valid_for(42, "user", 3600);
//! assert!(auth.authenticate("guess", &stored, &claims).is_err());
//!
//! let session = auth.authenticate("", &stored, &claims).unwrap();
//! let verified = auth.verify_session(&session.access_token).unwrap();
//! assert_eq!(verified.sub, "42");
//! assert_eq!(verified.role, "user");
//!
//! assert!(matches!(
//!     auth.verify_session("not.a.token"),
//!     Err(JwtError::MalformedToken(_))
//! ));
//! ```

pub mod authenticator;
pub mod code;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use code::VerificationCodeGenerator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
