use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

/// PostgreSQL pool settings.
///
/// ```ignore
/// let config = PostgresConfig::from_parts("localhost", 5432, "postgres", "postgres", "produto");
/// let db = database::postgres::connect_from_config(config).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Log every statement through `tracing`
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Builds the connection URL from discrete credentials.
    pub fn from_parts(host: &str, port: u16, username: &str, password: &str, database: &str) -> Self {
        Self::new(format!(
            "postgres://{}:{}@{}:{}/{}",
            username, password, host, port, database
        ))
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections;
        self
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 20,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 300,
            sqlx_logging: false,
        }
    }
}

/// Environment variables:
/// - `DATABASE_URL` - full connection string; wins over the discrete variables
/// - `DB_HOST` (localhost), `DB_PORT` (5432), `DB_USERNAME` (postgres),
///   `DB_PASSWORD` (postgres), `DB_DATABASE` (produto)
/// - `DB_MAX_CONNECTIONS` (20), `DB_MIN_CONNECTIONS` (1)
/// - `DB_LOGGING` (false)
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::from_parts(
                &env_or_default("DB_HOST", "localhost"),
                env_parse("DB_PORT", "5432")?,
                &env_or_default("DB_USERNAME", "postgres"),
                &env_or_default("DB_PASSWORD", "postgres"),
                &env_or_default("DB_DATABASE", "produto"),
            ),
        };

        Ok(Self {
            max_connections: env_parse("DB_MAX_CONNECTIONS", "20")?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", "1")?,
            sqlx_logging: env_parse("DB_LOGGING", "false")?,
            ..base
        })
    }
}
