use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store.
///
/// Used when no database is configured and by the HTTP tests. The phone
/// uniqueness check and the insert happen under one write lock, so concurrent
/// registrations for the same phone cannot both succeed.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    accounts: BTreeMap<AccountId, Account>,
}

impl State {
    fn phone_taken_by_other(&self, phone: &PhoneNumber, id: Option<AccountId>) -> bool {
        self.accounts
            .values()
            .any(|account| &account.phone == phone && Some(account.id) != id)
    }
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut state = self.state.write().await;

        if state.phone_taken_by_other(&account.phone, None) {
            return Err(AccountError::PhoneAlreadyRegistered(
                account.phone.to_string(),
            ));
        }

        state.next_id += 1;
        let account = account.with_id(AccountId(state.next_id));
        state.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<Account>, AccountError> {
        Ok(self
            .state
            .read()
            .await
            .accounts
            .values()
            .find(|account| &account.phone == phone)
            .cloned())
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut state = self.state.write().await;

        if !state.accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id.to_string()));
        }
        if state.phone_taken_by_other(&account.phone, Some(account.id)) {
            return Err(AccountError::PhoneAlreadyRegistered(
                account.phone.to_string(),
            ));
        }

        state.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn update_code(&self, id: AccountId, code: &str) -> Result<(), AccountError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(AccountError::NotFound(id.to_string()))?;

        account.code = Some(code.to_string());

        Ok(())
    }

    async fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        self.state
            .write()
            .await
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::account::models::Age;
    use crate::domain::account::models::Role;

    fn new_account(phone: &str) -> NewAccount {
        NewAccount {
            name: String::new(),
            phone: PhoneNumber::new(phone.to_string()).unwrap(),
            password_hash: "$argon2id$stub".to_string(),
            age: Age::default(),
            code: Some("123456".to_string()),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repository = InMemoryAccountRepository::new();

        let first = repository.create(new_account("+1555")).await.unwrap();
        let second = repository.create(new_account("+1666")).await.unwrap();

        assert_eq!(first.id, AccountId(1));
        assert_eq!(second.id, AccountId(2));
        assert_eq!(repository.len().await, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_phone() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("+1555")).await.unwrap();

        let result = repository.create(new_account("+1555")).await;

        assert!(matches!(
            result,
            Err(AccountError::PhoneAlreadyRegistered(_))
        ));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_for_same_phone() {
        let repository = Arc::new(InMemoryAccountRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(new_account("+1555")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_rejects_phone_of_another_account() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("+1555")).await.unwrap();
        let mut second = repository.create(new_account("+1666")).await.unwrap();

        second.phone = PhoneNumber::new("+1555".to_string()).unwrap();
        let result = repository.update(second).await;

        assert!(matches!(
            result,
            Err(AccountError::PhoneAlreadyRegistered(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let repository = InMemoryAccountRepository::new();
        let ghost = new_account("+1555").with_id(AccountId(99));

        let result = repository.update(ghost).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_code_keeps_concurrent_edits() {
        let repository = InMemoryAccountRepository::new();
        let account = repository.create(new_account("+1555")).await.unwrap();

        let mut promoted = account.clone();
        promoted.role = Role::Admin;
        promoted.password_hash = "$argon2id$rotated".to_string();
        repository.update(promoted).await.unwrap();

        repository.update_code(account.id, "999999").await.unwrap();

        let stored = repository.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(stored.code.as_deref(), Some("999999"));
        assert_eq!(stored.role, Role::Admin);
        assert_eq!(stored.password_hash, "$argon2id$rotated");
    }

    #[tokio::test]
    async fn test_update_code_missing_account() {
        let repository = InMemoryAccountRepository::new();

        assert!(matches!(
            repository.update_code(AccountId(42), "123456").await,
            Err(AccountError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_lookup() {
        let repository = InMemoryAccountRepository::new();
        let account = repository.create(new_account("+1555")).await.unwrap();

        repository.delete(account.id).await.unwrap();

        assert!(repository.find_by_id(account.id).await.unwrap().is_none());
        assert!(repository
            .find_by_phone(&account.phone)
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            repository.delete(account.id).await,
            Err(AccountError::NotFound(_))
        ));
    }
}
