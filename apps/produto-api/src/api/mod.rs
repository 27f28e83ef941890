use axum::Router;

pub mod health;
pub mod produtos;

/// Routes without the `/api/v1` prefix; `create_router` adds it.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/produto", produtos::router(state))
}

/// `/ready` with live database and redis probes.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
