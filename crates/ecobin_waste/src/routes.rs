use crate::handlers::{analytics_handler, history_handler, log_waste_handler, WasteState};
use axum::routing::{get, post};
use axum::{middleware, Router};
use ecobin_auth::{require_user, AuthState};
use ecobin_config::AppConfig;
use ecobin_db::DbClient;
use std::sync::Arc;

/// Creates a router containing all waste ledger routes.
pub fn routes(config: Arc<AppConfig>, db: DbClient) -> Router {
    let state = Arc::new(WasteState { db: db.clone() });
    let auth_state = AuthState { config, db };

    Router::new()
        .route("/waste/log", post(log_waste_handler))
        .route("/waste/analytics", get(analytics_handler))
        .route("/waste/history", get(history_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_user))
        .with_state(state)
}
