//! Axum handlers for registration, login, logout and the current user.

use crate::logic::{LoginData, LoginKey, LoginRequest, RegistrationForm};
use axum::extract::{Multipart, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::{Extension, Json};
use ecobin_auth::cookies::{
    expired_cookie, session_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use ecobin_auth::passwords::{hash_password, verify_password};
use ecobin_auth::tokens::{create_access_token, create_refresh_token};
use ecobin_auth::CurrentUser;
use ecobin_common::error::{conflict, internal_error, not_found, validation_error};
use ecobin_common::models::User;
use ecobin_common::services::AvatarStorage;
use ecobin_common::{ApiError, ApiResponse};
use ecobin_config::AppConfig;
use ecobin_db::{DbClient, SqlUserRepository, UserRepository};
use std::sync::Arc;
use tracing::info;

/// Shared state for the identity handlers.
pub struct UsersState {
    pub config: Arc<AppConfig>,
    pub db: DbClient,
    pub avatars: Arc<dyn AvatarStorage>,
}

async fn collect_registration_form(
    mut multipart: Multipart,
) -> Result<RegistrationForm, ApiError> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| validation_error("Malformed multipart payload"))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        match name.as_str() {
            "avatar" => {
                form.avatar_file_name = field.file_name().map(|f| f.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| validation_error("Malformed multipart payload"))?;
                form.avatar_bytes = Some(bytes.to_vec());
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| validation_error("Malformed multipart payload"))?;
                match other {
                    "username" => form.username = value,
                    "email" => form.email = value,
                    "fullName" => form.full_name = value,
                    "password" => form.password = value,
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

/// `POST /users/register`: multipart form with the account fields and an
/// `avatar` file.
pub async fn register_handler(
    State(state): State<Arc<UsersState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = collect_registration_form(multipart).await?.validate()?;

    let users = SqlUserRepository::new(state.db.clone());
    let taken = users.find_by_username(&form.username).await?.is_some()
        || users.find_by_email(&form.email).await?.is_some();
    if taken {
        return Err(conflict("User with this email or username already exists"));
    }

    let password_hash = hash_password(&form.password)?;

    let file_name = form.avatar_file_name.as_deref().unwrap_or("avatar.png");
    let avatar_bytes = form.avatar_bytes.unwrap_or_default();
    let avatar_url = state
        .avatars
        .store(file_name, avatar_bytes)
        .await
        .map_err(|e| internal_error(format!("Error while uploading avatar: {e}")))?;

    let user = users
        .create(User::new(
            form.username,
            form.email,
            form.full_name,
            avatar_url,
            password_hash,
        ))
        .await?;

    info!("Registered user {} ({})", user.username, user.id);
    Ok(ApiResponse::created(user, "User registered successfully").into_response())
}

/// `POST /users/login`: JSON body with `username` or `email` plus
/// `password`. Sets the session cookies and echoes the tokens in the body.
pub async fn login_handler(
    State(state): State<Arc<UsersState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (key, password) = request.validate()?;

    let users = SqlUserRepository::new(state.db.clone());
    let user = match key {
        LoginKey::Username(username) => users.find_by_username(username).await?,
        LoginKey::Email(email) => users.find_by_email(email).await?,
    }
    .ok_or_else(|| not_found("User does not exist"))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(ApiError::Authentication(
            "Invalid user credentials".to_string(),
        ));
    }

    let auth = &state.config.auth;
    let access_token = create_access_token(&user, auth)?;
    let refresh_token = create_refresh_token(&user, auth)?;
    users
        .set_refresh_token(&user.id, Some(refresh_token.as_str()))
        .await?;

    info!("User {} logged in", user.username);
    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            session_cookie(
                ACCESS_TOKEN_COOKIE,
                &access_token,
                auth.access_token_ttl_secs,
                auth.secure_cookies,
            ),
        ),
        (
            SET_COOKIE,
            session_cookie(
                REFRESH_TOKEN_COOKIE,
                &refresh_token,
                auth.refresh_token_ttl_secs,
                auth.secure_cookies,
            ),
        ),
    ]);
    let body = ApiResponse::ok(
        LoginData {
            user,
            access_token,
            refresh_token,
        },
        "User logged in successfully",
    );
    Ok((cookies, body).into_response())
}

/// `POST /users/logout`: clears the stored refresh token and expires both
/// session cookies.
pub async fn logout_handler(
    State(state): State<Arc<UsersState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    let users = SqlUserRepository::new(state.db.clone());
    users.set_refresh_token(&user.id, None).await?;

    info!("User {} logged out", user.username);
    let secure = state.config.auth.secure_cookies;
    let cookies = AppendHeaders([
        (SET_COOKIE, expired_cookie(ACCESS_TOKEN_COOKIE, secure)),
        (SET_COOKIE, expired_cookie(REFRESH_TOKEN_COOKIE, secure)),
    ]);
    let body = ApiResponse::ok(serde_json::json!({}), "User logged out successfully");
    Ok((cookies, body).into_response())
}

/// `GET /users/me`: the authenticated account, freshly loaded by the auth
/// middleware.
pub async fn me_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResponse<User> {
    ApiResponse::ok(user, "Current user fetched successfully")
}
