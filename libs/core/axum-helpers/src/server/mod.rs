//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI documentation UIs
//! - Liveness (`/health`) and readiness helpers
//! - Graceful shutdown with a bounded cleanup window

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{API_PREFIX, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
