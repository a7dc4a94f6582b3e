use async_trait::async_trait;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Age;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::ports::AccountRepository;

const PHONE_UNIQUE_CONSTRAINT: &str = "accounts_phone_key";

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    phone: String,
    password_hash: String,
    age: i32,
    code: Option<String>,
    role: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            name: row.name,
            phone: PhoneNumber::new(row.phone)?,
            password_hash: row.password_hash,
            age: Age::new(row.age)?,
            code: row.code,
            role: row.role.parse()?,
        })
    }
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, phone: &PhoneNumber) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(PHONE_UNIQUE_CONSTRAINT) {
            return AccountError::PhoneAlreadyRegistered(phone.to_string());
        }
    }
    tracing::error!(error = %e, "Account write failed");
    AccountError::DatabaseError(e.to_string())
}

fn map_read_error(e: sqlx::Error) -> AccountError {
    tracing::error!(error = %e, "Account read failed");
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO accounts (name, phone, password_hash, age, code, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&account.name)
        .bind(account.phone.as_str())
        .bind(&account.password_hash)
        .bind(account.age.value())
        .bind(account.code.as_deref())
        .bind(account.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &account.phone))?;

        Ok(account.with_id(AccountId(id)))
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, phone, password_hash, age, code, role
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, phone, password_hash, age, code, role
            FROM accounts
            WHERE phone = $1
            "#,
        )
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET name = $2, phone = $3, password_hash = $4, age = $5, code = $6, role = $7
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(&account.name)
        .bind(account.phone.as_str())
        .bind(&account.password_hash)
        .bind(account.age.value())
        .bind(account.code.as_deref())
        .bind(account.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &account.phone))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }

    async fn update_code(&self, id: AccountId, code: &str) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET code = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(map_read_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(map_read_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
