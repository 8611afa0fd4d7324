use crate::handlers::{
    create_reward_handler, list_rewards_handler, redeem_reward_handler, RewardsState,
};
use axum::routing::{get, post};
use axum::{middleware, Router};
use ecobin_auth::{require_admin, require_user, AuthState};
use ecobin_config::AppConfig;
use ecobin_db::DbClient;
use std::sync::Arc;

/// Creates a router containing all reward routes.
pub fn routes(config: Arc<AppConfig>, db: DbClient) -> Router {
    let state = Arc::new(RewardsState { db: db.clone() });
    let auth_state = AuthState { config, db };

    let admin = Router::new()
        .route("/rewards/create", post(create_reward_handler))
        .route_layer(middleware::from_fn(require_admin))
        .with_state(state.clone());

    Router::new()
        .route("/rewards", get(list_rewards_handler))
        .route("/rewards/redeem/{rewardId}", post(redeem_reward_handler))
        .with_state(state)
        .merge(admin)
        // Added last so authentication runs before the role guard.
        .route_layer(middleware::from_fn_with_state(auth_state, require_user))
}
