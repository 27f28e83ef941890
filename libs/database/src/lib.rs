//! Connectors and probes for the stores the catalog service talks to.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL through SeaORM, plus migration running
//! - `redis` (default) - Redis `ConnectionManager` used by the mail stream
//! - `config` - `core_config::FromEnv` implementations for both configs
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "produto_api").await?;
//!
//! let redis = database::redis::connect_with_retry("redis://127.0.0.1:6379", None).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
