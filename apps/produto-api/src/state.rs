//! Application state shared by the route builders.

use tonic::transport::Channel;

/// Cloned per router; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Redis connection manager backing the mail stream
    pub redis: database::redis::ConnectionManager,
    /// Lazy channel to the identity service
    pub usuario_channel: Channel,
}
