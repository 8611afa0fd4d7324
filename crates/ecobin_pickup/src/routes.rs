use crate::handlers::{nearby_bins_handler, request_pickup_handler, PickupState};
use axum::routing::{get, post};
use axum::{middleware, Router};
use ecobin_auth::{require_user, require_waste_picker, AuthState};
use ecobin_config::AppConfig;
use ecobin_db::DbClient;
use std::sync::Arc;

/// Creates a router containing all pickup dispatch routes.
pub fn routes(config: Arc<AppConfig>, db: DbClient) -> Router {
    let state = Arc::new(PickupState {
        config: config.clone(),
        db: db.clone(),
    });
    let auth_state = AuthState { config, db };

    Router::new()
        .route("/pickup/nearby-bins", get(nearby_bins_handler))
        .route("/pickup/request", post(request_pickup_handler))
        .route_layer(middleware::from_fn(require_waste_picker))
        // Added last so authentication runs before the role guard.
        .route_layer(middleware::from_fn_with_state(auth_state, require_user))
        .with_state(state)
}
