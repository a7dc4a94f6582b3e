use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::VerificationCodeGenerator;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::CodeSender;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountDetails;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Age;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::models::Role;
use crate::domain::account::models::UpdateAccountCommand;

/// Session validity when none is configured: one year.
pub const DEFAULT_TOKEN_VALIDITY_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CodeSender,
{
    repository: Arc<AR>,
    code_sender: Arc<CS>,
    authenticator: Arc<Authenticator>,
    code_generator: VerificationCodeGenerator,
    token_validity_seconds: i64,
}

impl<AR, CS> AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CodeSender,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `code_sender` - Verification code delivery implementation
    /// * `authenticator` - Password hashing and session token signing
    pub fn new(
        repository: Arc<AR>,
        code_sender: Arc<CS>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            code_sender,
            authenticator,
            code_generator: VerificationCodeGenerator::default(),
            token_validity_seconds: DEFAULT_TOKEN_VALIDITY_SECONDS,
        }
    }

    /// Override how long issued session tokens stay valid.
    pub fn with_token_validity(mut self, seconds: i64) -> Self {
        self.token_validity_seconds = seconds;
        self
    }

    /// Override the verification code generator.
    pub fn with_code_generator(mut self, code_generator: VerificationCodeGenerator) -> Self {
        self.code_generator = code_generator;
        self
    }

    async fn ensure_phone_available(&self, phone: &PhoneNumber) -> Result<(), AccountError> {
        match self.repository.find_by_phone(phone).await? {
            Some(_) => Err(AccountError::PhoneAlreadyRegistered(phone.to_string())),
            None => Ok(()),
        }
    }

    async fn existing_account(&self, id: AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn send_code(&self, phone: &PhoneNumber, code: &str) {
        if let Err(e) = self.code_sender.send_code(phone, code).await {
            tracing::error!(
                phone = %phone.masked(),
                error = %e,
                "Failed to deliver verification code"
            );
        }
    }

    /// Overwrite every mutable field of `existing`; the password is always re-hashed.
    async fn replace_fields(
        &self,
        existing: Account,
        details: AccountDetails,
        role: Role,
    ) -> Result<Account, AccountError> {
        let password_hash = self.authenticator.hash_password(&details.password)?;

        let account = Account {
            id: existing.id,
            name: details.name,
            phone: details.phone,
            password_hash,
            age: details.age,
            code: details.code,
            role,
        };

        self.repository.update(account).await
    }
}

#[async_trait]
impl<AR, CS> AccountServicePort for AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CodeSender,
{
    async fn register(&self, phone: PhoneNumber) -> Result<Account, AccountError> {
        self.ensure_phone_available(&phone).await?;

        let code = self.code_generator.generate();
        let password_hash = self.authenticator.hash_password("")?;

        let account = self
            .repository
            .create(NewAccount {
                name: String::new(),
                phone,
                password_hash,
                age: Age::default(),
                code: Some(code.clone()),
                role: Role::User,
            })
            .await?;

        tracing::info!(
            account_id = %account.id,
            phone = %account.phone.masked(),
            "Account registered"
        );

        self.send_code(&account.phone, &code).await;

        Ok(account)
    }

    async fn resend_code(&self, phone: PhoneNumber) -> Result<Account, AccountError> {
        let mut account = self
            .repository
            .find_by_phone(&phone)
            .await?
            .ok_or(AccountError::NotFoundByPhone(phone.to_string()))?;

        let code = self.code_generator.generate();
        self.repository.update_code(account.id, &code).await?;
        account.code = Some(code.clone());

        tracing::info!(account_id = %account.id, "Verification code replaced");

        self.send_code(&account.phone, &code).await;

        Ok(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        let account = self
            .repository
            .find_by_phone(&command.phone)
            .await?
            .ok_or(AccountError::NotFoundByPhone(command.phone.to_string()))?;

        if !account.code_matches(&command.code) {
            tracing::debug!(account_id = %account.id, "Login rejected: verification code mismatch");
            return Err(AccountError::InvalidCode);
        }

        let claims = Claims::valid_for(account.id, account.role, self.token_validity_seconds);

        let result = self
            .authenticator
            .authenticate(&command.password, &account.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::JwtError(err) => AccountError::Token(err),
            })?;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            expires_at = claims.exp,
            "Session token issued"
        );

        Ok(LoginOutcome {
            access_token: result.access_token,
            role: account.role,
        })
    }

    async fn update_own_account(
        &self,
        caller: AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        if caller != command.id {
            return Err(AccountError::Forbidden(format!(
                "account {} may not edit account {}",
                caller, command.id
            )));
        }

        let existing = self.existing_account(command.id).await?;
        let role = existing.role;

        self.replace_fields(existing, command.details, role).await
    }

    async fn create_account(
        &self,
        command: CreateAccountCommand,
    ) -> Result<Account, AccountError> {
        let details = command.details;
        self.ensure_phone_available(&details.phone).await?;

        let password_hash = self.authenticator.hash_password(&details.password)?;

        let account = self
            .repository
            .create(NewAccount {
                name: details.name,
                phone: details.phone,
                password_hash,
                age: details.age,
                code: details.code,
                role: command.role,
            })
            .await?;

        tracing::info!(account_id = %account.id, role = %account.role, "Account created");

        Ok(account)
    }

    async fn update_account(
        &self,
        command: UpdateAccountCommand,
        role: Role,
    ) -> Result<Account, AccountError> {
        let existing = self.existing_account(command.id).await?;

        self.replace_fields(existing, command.details, role).await
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), AccountError> {
        self.existing_account(id).await?;
        self.repository.delete(id).await?;

        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}
