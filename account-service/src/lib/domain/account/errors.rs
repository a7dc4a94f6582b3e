use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid account id: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Phone number is empty")]
    Empty,

    #[error("Phone number must contain between {min} and {max} digits, got {actual}")]
    InvalidLength {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Phone number may only contain digits after an optional leading '+'")]
    InvalidCharacters,
}

/// Error for Age validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgeError {
    #[error("Age must be between 0 and {max}, got {actual}")]
    OutOfRange { max: i32, actual: i32 },
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for verification code delivery
#[derive(Debug, Clone, Error)]
pub enum CodeDeliveryError {
    #[error("Code delivery rejected: {0}")]
    Rejected(String),

    #[error("Code delivery unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account id: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneNumberError),

    #[error("Invalid age: {0}")]
    InvalidAge(#[from] AgeError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    // Domain-level errors
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Phone number does not exist: {0}")]
    NotFoundByPhone(String),

    #[error("Phone number already registered: {0}")]
    PhoneAlreadyRegistered(String),

    #[error("Verification code is incorrect")]
    InvalidCode,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
