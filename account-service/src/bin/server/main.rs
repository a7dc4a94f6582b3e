use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::sms::LoggingCodeSender;
use auth::Authenticator;
use auth::VerificationCodeGenerator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database_configured = config.database.url.is_some(),
        token_validity_seconds = config.jwt.validity_seconds,
        code_length = config.verification.code_length,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let account_service = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_account_service(
                Arc::new(PostgresAccountRepository::new(pg_pool)),
                Arc::clone(&authenticator),
                &config,
            )
        }
        None => {
            tracing::warn!("No database.url configured; accounts are kept in memory");
            build_account_service(
                Arc::new(InMemoryAccountRepository::new()),
                Arc::clone(&authenticator),
                &config,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_account_service<AR: AccountRepository>(
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    config: &Config,
) -> Arc<dyn AccountServicePort> {
    Arc::new(
        AccountService::new(repository, Arc::new(LoggingCodeSender::new()), authenticator)
            .with_token_validity(config.jwt.validity_seconds)
            .with_code_generator(VerificationCodeGenerator::new(
                config.verification.code_length,
            )),
    )
}
