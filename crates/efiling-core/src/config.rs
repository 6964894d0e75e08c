//! Configuration module
//!
//! Environment-backed configuration for the API and services: server,
//! database, e-filing hub credentials, rasterizer endpoint, and the
//! encryption keyring spec.

use std::env;

use anyhow::Context;

// Common constants
const DEFAULT_SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_EFILING_TIMEOUT_SECS: u64 = 60;
const DEFAULT_APP_NAME: &str = "protection-order-efiling";

/// Service configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    log_json: bool,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    // E-filing hub
    efiling_base_url: String,
    efiling_client_id: String,
    efiling_client_secret: String,
    efiling_app_name: String,
    efiling_timeout_seconds: u64,
    // Base URL the filing office redirects back to (success/error/cancel)
    efiling_return_base_url: String,
    // Image-to-PDF rasterization service
    pdf_service_url: String,
    // Keyring spec: "keyId=base64Key[,keyId=base64Key...]"
    encryption_keys: String,
}

impl Config {
    /// Load configuration from the environment (reads .env first when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = env_parsed("SERVER_PORT", DEFAULT_SERVER_PORT)?;
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            server_port,
            cors_origins,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_json: env::var("LOG_JSON").map(|v| v == "1" || v == "true").unwrap_or(false),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL is not set")?,
            db_max_connections: env_parsed("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: env_parsed("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            efiling_base_url: env::var("EFILING_BASE_URL").context("EFILING_BASE_URL is not set")?,
            efiling_client_id: env::var("EFILING_CLIENT_ID")
                .context("EFILING_CLIENT_ID is not set")?,
            efiling_client_secret: env::var("EFILING_CLIENT_SECRET")
                .context("EFILING_CLIENT_SECRET is not set")?,
            efiling_app_name: env::var("EFILING_APP_NAME")
                .unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()),
            efiling_timeout_seconds: env_parsed(
                "EFILING_TIMEOUT_SECONDS",
                DEFAULT_EFILING_TIMEOUT_SECS,
            )?,
            efiling_return_base_url: env::var("EFILING_RETURN_BASE_URL")
                .context("EFILING_RETURN_BASE_URL is not set")?,
            pdf_service_url: env::var("PDF_SERVICE_URL").context("PDF_SERVICE_URL is not set")?,
            encryption_keys: env::var("ENCRYPTION_KEYS").context("ENCRYPTION_KEYS is not set")?,
        })
    }

    /// Fail fast on obviously broken configuration.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgres") {
            anyhow::bail!("DATABASE_URL must be a postgres connection string");
        }
        if !self.efiling_base_url.starts_with("http") {
            anyhow::bail!("EFILING_BASE_URL must be an http(s) URL");
        }
        if !self.pdf_service_url.starts_with("http") {
            anyhow::bail!("PDF_SERVICE_URL must be an http(s) URL");
        }
        if self.encryption_keys.trim().is_empty() {
            anyhow::bail!("ENCRYPTION_KEYS must not be empty");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn log_json(&self) -> bool {
        self.log_json
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn efiling_base_url(&self) -> &str {
        &self.efiling_base_url
    }

    pub fn efiling_client_id(&self) -> &str {
        &self.efiling_client_id
    }

    pub fn efiling_client_secret(&self) -> &str {
        &self.efiling_client_secret
    }

    pub fn efiling_app_name(&self) -> &str {
        &self.efiling_app_name
    }

    pub fn efiling_timeout_seconds(&self) -> u64 {
        self.efiling_timeout_seconds
    }

    pub fn efiling_return_base_url(&self) -> &str {
        &self.efiling_return_base_url
    }

    pub fn pdf_service_url(&self) -> &str {
        &self.pdf_service_url
    }

    pub fn encryption_keys(&self) -> &str {
        &self.encryption_keys
    }
}

fn env_parsed<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
