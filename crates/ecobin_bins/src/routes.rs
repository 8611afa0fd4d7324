use crate::handlers::{my_bin_handler, update_status_handler, BinsState};
use axum::routing::{get, post};
use axum::{middleware, Router};
use ecobin_auth::{require_user, AuthState};
use ecobin_config::AppConfig;
use ecobin_db::DbClient;
use std::sync::Arc;

/// Creates a router containing all bin routes.
pub fn routes(config: Arc<AppConfig>, db: DbClient) -> Router {
    let state = Arc::new(BinsState { db: db.clone() });
    let auth_state = AuthState { config, db };

    let owned = Router::new()
        .route("/bin/my-bin", get(my_bin_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_user))
        .with_state(state.clone());

    // Telemetry stays unauthenticated: the fleet predates per-device
    // credentials and is trusted at the network layer.
    Router::new()
        .route("/bin/update-status", post(update_status_handler))
        .with_state(state)
        .merge(owned)
}
