#![allow(dead_code)]

use std::sync::Arc;

use account_service::domain::account::models::Account;
use account_service::domain::account::models::Age;
use account_service::domain::account::models::NewAccount;
use account_service::domain::account::models::PhoneNumber;
use account_service::domain::account::models::Role;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::sms::LoggingCodeSender;
use auth::Authenticator;
use auth::Claims;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryAccountRepository>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::new());
        let authenticator = Arc::new(Authenticator::new(SECRET));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&repository),
            Arc::new(LoggingCodeSender::new()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(account_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            authenticator,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Read an account straight from the store
    pub async fn stored_account(&self, phone: &str) -> Option<Account> {
        self.repository
            .find_by_phone(&PhoneNumber::new(phone.to_string()).unwrap())
            .await
            .expect("In-memory lookup cannot fail")
    }

    /// Insert an account directly, bypassing the HTTP surface
    pub async fn seed_account(&self, phone: &str, password: &str, role: Role) -> Account {
        self.repository
            .create(NewAccount {
                name: "seeded".to_string(),
                phone: PhoneNumber::new(phone.to_string()).unwrap(),
                password_hash: self.authenticator.hash_password(password).unwrap(),
                age: Age::new(30).unwrap(),
                code: Some("123456".to_string()),
                role,
            })
            .await
            .expect("Failed to seed account")
    }

    /// Sign a session token for `account` valid for one hour
    pub fn token_for(&self, account: &Account) -> String {
        self.authenticator
            .generate_token(&Claims::valid_for(account.id, account.role, 3600))
            .expect("Failed to sign token")
    }
}
