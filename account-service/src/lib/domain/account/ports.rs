use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::CodeDeliveryError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::models::Role;
use crate::domain::account::models::UpdateAccountCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Self-register a phone number and send it a verification code.
    ///
    /// The account starts with an empty name, age 0, the hash of the empty
    /// password and the `user` role.
    ///
    /// # Errors
    /// * `PhoneAlreadyRegistered` - An account already uses this phone
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, phone: PhoneNumber) -> Result<Account, AccountError>;

    /// Replace the pending verification code and send the new one.
    ///
    /// # Errors
    /// * `NotFoundByPhone` - No account uses this phone
    /// * `DatabaseError` - Database operation failed
    async fn resend_code(&self, phone: PhoneNumber) -> Result<Account, AccountError>;

    /// Check phone, code and password, in that order, and issue a session token.
    ///
    /// # Errors
    /// * `NotFoundByPhone` - No account uses this phone
    /// * `InvalidCode` - Code does not match the pending code
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token could not be signed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError>;

    /// Replace the caller's own account fields, keeping its role.
    ///
    /// # Arguments
    /// * `caller` - Account id carried by the caller's session token
    /// * `command` - Target id and replacement fields
    ///
    /// # Errors
    /// * `Forbidden` - Target is not the caller's account
    /// * `NotFound` - Account does not exist
    /// * `PhoneAlreadyRegistered` - New phone belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update_own_account(
        &self,
        caller: AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// Create an account with caller-chosen fields and role.
    ///
    /// # Errors
    /// * `PhoneAlreadyRegistered` - An account already uses this phone
    /// * `DatabaseError` - Database operation failed
    async fn create_account(&self, command: CreateAccountCommand)
        -> Result<Account, AccountError>;

    /// Replace an account's fields and role.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `PhoneAlreadyRegistered` - New phone belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update_account(
        &self,
        command: UpdateAccountCommand,
        role: Role,
    ) -> Result<Account, AccountError>;

    /// Permanently remove an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, id: AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for account aggregate.
///
/// Implementations must enforce phone uniqueness atomically: a second writer
/// for the same phone fails with `PhoneAlreadyRegistered`.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account and return it with its assigned id.
    ///
    /// # Errors
    /// * `PhoneAlreadyRegistered` - Phone is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by phone number.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<Account>, AccountError>;

    /// Overwrite an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `PhoneAlreadyRegistered` - New phone belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Replace only the pending verification code, leaving every other column alone.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_code(&self, id: AccountId, code: &str) -> Result<(), AccountError>;

    /// Remove account from storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: AccountId) -> Result<(), AccountError>;
}

/// Out-of-band delivery of verification codes.
#[async_trait]
pub trait CodeSender: Send + Sync + 'static {
    /// Deliver `code` to `phone`.
    ///
    /// # Errors
    /// * `Rejected` - The provider refused the message
    /// * `Unavailable` - The provider could not be reached
    async fn send_code(&self, phone: &PhoneNumber, code: &str) -> Result<(), CodeDeliveryError>;
}
