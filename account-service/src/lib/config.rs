use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub verification: VerificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string; the in-memory store is used when absent.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub validity_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VerificationConfig {
    pub code_length: usize,
}

impl JwtConfig {
    pub const MIN_SECRET_BYTES: usize = 32;
}

impl VerificationConfig {
    pub const MIN_CODE_LENGTH: usize = 4;
    pub const MAX_CODE_LENGTH: usize = 10;
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8000)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.validity_seconds", 365 * 24 * 60 * 60)?
            .set_default("verification.code_length", 6)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < JwtConfig::MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                JwtConfig::MIN_SECRET_BYTES
            )));
        }

        if self.jwt.validity_seconds <= 0 {
            return Err(ConfigError::Message(
                "jwt.validity_seconds must be positive".to_string(),
            ));
        }

        let code_lengths = VerificationConfig::MIN_CODE_LENGTH..=VerificationConfig::MAX_CODE_LENGTH;
        if !code_lengths.contains(&self.verification.code_length) {
            return Err(ConfigError::Message(format!(
                "verification.code_length must be between {} and {}",
                VerificationConfig::MIN_CODE_LENGTH,
                VerificationConfig::MAX_CODE_LENGTH
            )));
        }

        Ok(())
    }
}
