use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::AccountIdError;
use crate::account::errors::AgeError;
use crate::account::errors::PhoneNumberError;
use crate::account::errors::RoleError;

/// Account aggregate entity.
///
/// Identity record for a user or an administrator. The phone number is the
/// unique lookup key; the password is only ever held as a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub phone: PhoneNumber,
    pub password_hash: String,
    pub age: Age,
    pub code: Option<String>,
    pub role: Role,
}

impl Account {
    /// Whether `code` matches the pending verification code exactly.
    ///
    /// An account without a pending code never matches.
    pub fn code_matches(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

/// Account fields prior to persistence; storage assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub phone: PhoneNumber,
    pub password_hash: String,
    pub age: Age,
    pub code: Option<String>,
    pub role: Role,
}

impl NewAccount {
    /// Attach the storage-assigned identifier.
    pub fn with_id(self, id: AccountId) -> Account {
        Account {
            id,
            name: self.name,
            phone: self.phone,
            password_hash: self.password_hash,
            age: self.age,
            code: self.code,
            role: self.role,
        }
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        s.trim()
            .parse::<i64>()
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(format!("{s:?}: {e}")))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access tier attached to an account.
///
/// Gating compares roles for equality only; there is no hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Phone number value type
///
/// An optional leading `+` followed by 3 to 15 ASCII digits. Surrounding
/// whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 3;
    const MAX_DIGITS: usize = 15;

    /// Create a new validated phone number.
    ///
    /// # Errors
    /// * `Empty` - Nothing but whitespace was supplied
    /// * `InvalidCharacters` - Contains anything other than digits after the `+`
    /// * `InvalidLength` - Fewer than 3 or more than 15 digits
    pub fn new(phone: String) -> Result<Self, PhoneNumberError> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let digits = phone.strip_prefix('+').unwrap_or(phone);
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::InvalidCharacters);
        }

        let count = digits.len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&count) {
            return Err(PhoneNumberError::InvalidLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                actual: count,
            });
        }

        Ok(Self(phone.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Phone number with all but the last four digits hidden, for logs.
    pub fn masked(&self) -> String {
        let (prefix, digits) = match self.0.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", self.0.as_str()),
        };
        let visible = digits.len().min(4);
        let hidden = digits.len() - visible;
        format!("{}{}{}", prefix, "*".repeat(hidden), &digits[hidden..])
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Age value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Age(i32);

impl Age {
    const MAX: i32 = 150;

    /// # Errors
    /// * `OutOfRange` - Negative or above 150
    pub fn new(age: i32) -> Result<Self, AgeError> {
        if (0..=Self::MAX).contains(&age) {
            Ok(Self(age))
        } else {
            Err(AgeError::OutOfRange {
                max: Self::MAX,
                actual: age,
            })
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Mutable account fields supplied by a caller.
///
/// `password` is plain text; the service hashes it before anything is stored.
#[derive(Debug, Clone)]
pub struct AccountDetails {
    pub name: String,
    pub phone: PhoneNumber,
    pub password: String,
    pub age: Age,
    pub code: Option<String>,
}

/// Command to log in with a phone number, verification code and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub phone: PhoneNumber,
    pub code: String,
    pub password: String,
}

/// Command to create an account with an explicit role.
#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub details: AccountDetails,
    pub role: Role,
}

/// Command to replace every mutable field of an existing account.
#[derive(Debug, Clone)]
pub struct UpdateAccountCommand {
    pub id: AccountId,
    pub details: AccountDetails,
}

/// Successful login: a signed session token and the role it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub access_token: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_accepts_plus_and_digits() {
        assert_eq!(
            PhoneNumber::new("+1555".to_string()).unwrap().as_str(),
            "+1555"
        );
        assert_eq!(
            PhoneNumber::new(" 0123456789 ".to_string()).unwrap().as_str(),
            "0123456789"
        );
    }

    #[test]
    fn test_phone_number_rejects_bad_input() {
        assert_eq!(
            PhoneNumber::new("   ".to_string()),
            Err(PhoneNumberError::Empty)
        );
        assert_eq!(
            PhoneNumber::new("+1-555".to_string()),
            Err(PhoneNumberError::InvalidCharacters)
        );
        assert!(matches!(
            PhoneNumber::new("+12".to_string()),
            Err(PhoneNumberError::InvalidLength { actual: 2, .. })
        ));
        assert!(matches!(
            PhoneNumber::new("1234567890123456".to_string()),
            Err(PhoneNumberError::InvalidLength { actual: 16, .. })
        ));
    }

    #[test]
    fn test_phone_number_masking() {
        let phone = PhoneNumber::new("+15551234567".to_string()).unwrap();
        assert_eq!(phone.masked(), "+*******4567");

        let short = PhoneNumber::new("555".to_string()).unwrap();
        assert_eq!(short.masked(), "555");
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!(
            "root".parse::<Role>(),
            Err(RoleError::Unknown("root".to_string()))
        );
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"user\"").unwrap(),
            Role::User
        );
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(Age::new(0).unwrap().value(), 0);
        assert_eq!(Age::new(150).unwrap().value(), 150);
        assert!(Age::new(-1).is_err());
        assert!(Age::new(151).is_err());
    }

    #[test]
    fn test_account_id_parsing() {
        assert_eq!(AccountId::from_string("42"), Ok(AccountId(42)));
        assert!(AccountId::from_string("forty-two").is_err());
    }

    #[test]
    fn test_code_matches_is_exact() {
        let account = NewAccount {
            name: String::new(),
            phone: PhoneNumber::new("+1555".to_string()).unwrap(),
            password_hash: String::new(),
            age: Age::default(),
            code: Some("012345".to_string()),
            role: Role::User,
        }
        .with_id(AccountId(1));

        assert!(account.code_matches("012345"));
        assert!(!account.code_matches("12345"));
        assert!(!account.code_matches("012345 "));

        let without_code = Account {
            code: None,
            ..account
        };
        assert!(!without_code.code_matches(""));
    }
}
