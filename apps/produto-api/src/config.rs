use core_config::{AppInfo, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use database::redis::RedisConfig;

pub use core_config::Environment;

const DEFAULT_USUARIO_URL: &str = "http://127.0.0.1:50051";
const DEFAULT_EXPORT_DIR: &str = "tmp/export";

/// Application configuration, composed from the shared config pieces.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub redis: RedisConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Identity service (`GRPC_USUARIO_URL`)
    pub usuario_url: String,
    /// Where generated reports are written (`EXPORT_DIR`)
    pub export_dir: String,
    /// Apply pending migrations at startup (`DB_RUN_MIGRATIONS`)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let redis = RedisConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            redis,
            server,
            environment,
            usuario_url: env_or_default("GRPC_USUARIO_URL", DEFAULT_USUARIO_URL),
            export_dir: env_or_default("EXPORT_DIR", DEFAULT_EXPORT_DIR),
            run_migrations: env_parse("DB_RUN_MIGRATIONS", "true")?,
        })
    }
}
