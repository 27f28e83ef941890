#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Redis endpoint used for the outgoing mail stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedisConfig {
    pub url: String,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REDIS_URL)
    }
}

/// Reads `REDIS_URL`, falling back to the local default.
#[cfg(feature = "config")]
impl FromEnv for RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_or_default("REDIS_URL", DEFAULT_REDIS_URL)))
    }
}
