//! Axum middleware for the access-control gate.
//!
//! Two composable stages: [`require_user`] authenticates the bearer token
//! and attaches the resolved account to the request, and the role guards
//! authorize against an allow-list. Either failure is fatal to the request.

use crate::cookies::bearer_token;
use crate::tokens::verify_access_token;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use ecobin_common::models::{Role, User};
use ecobin_common::ApiError;
use ecobin_config::AppConfig;
use ecobin_db::{DbClient, SqlUserRepository, UserRepository};
use std::sync::Arc;
use tracing::debug;

/// The authenticated account, attached to request extensions by
/// [`require_user`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AppConfig>,
    pub db: DbClient,
}

/// Authenticate the request.
///
/// Resolves the bearer token (cookie or Authorization header), verifies it,
/// and loads the user it names. 401 when the token is absent, malformed,
/// expired, or the user no longer exists.
pub async fn require_user(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError::Authentication("Unauthorized request".to_string()))?;

    let claims = verify_access_token(&token, &state.config.auth)
        .map_err(|_| ApiError::Authentication("Invalid access token".to_string()))?;

    let users = SqlUserRepository::new(state.db.clone());
    let user = users
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::Authentication("Invalid access token".to_string()))?;

    debug!("Authenticated user {} ({})", user.username, user.role.as_str());
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

async fn require_role_in(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| ApiError::Authentication("Unauthorized request".to_string()))?;

    if !allowed.contains(&user.0.role) {
        return Err(ApiError::Authorization(format!(
            "Forbidden. User role ({}) is not authorized for this resource",
            user.0.role.as_str()
        )));
    }

    Ok(next.run(req).await)
}

/// Authorize administrators only. Must run after [`require_user`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role_in(&[Role::Admin], req, next).await
}

/// Authorize waste pickers (and administrators). Must run after
/// [`require_user`].
pub async fn require_waste_picker(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role_in(&[Role::WastePicker, Role::Admin], req, next).await
}
