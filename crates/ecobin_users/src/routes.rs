use crate::handlers::{login_handler, logout_handler, me_handler, register_handler, UsersState};
use axum::routing::{get, post};
use axum::{middleware, Router};
use ecobin_auth::{require_user, AuthState};
use ecobin_common::services::AvatarStorage;
use ecobin_config::AppConfig;
use ecobin_db::DbClient;
use std::sync::Arc;

/// Creates a router containing all identity routes.
pub fn routes(config: Arc<AppConfig>, db: DbClient, avatars: Arc<dyn AvatarStorage>) -> Router {
    let state = Arc::new(UsersState {
        config: config.clone(),
        db: db.clone(),
        avatars,
    });
    let auth_state = AuthState { config, db };

    let session = Router::new()
        .route("/users/logout", post(logout_handler))
        .route("/users/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_user))
        .with_state(state.clone());

    Router::new()
        .route("/users/register", post(register_handler))
        .route("/users/login", post(login_handler))
        .with_state(state)
        .merge(session)
}
