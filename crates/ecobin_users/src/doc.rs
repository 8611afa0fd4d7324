#![allow(dead_code)]
#![cfg(feature = "openapi")]
use crate::logic::{LoginData, LoginRequest};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/users/register",
    request_body(content_type = "multipart/form-data", description = "username, email, fullName, password fields plus an avatar file"),
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Missing field or avatar"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "Users"
)]
fn doc_register_handler() {}

#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookies set", body = LoginData),
        (status = 400, description = "Missing identifier or password"),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown user")
    ),
    tag = "Users"
)]
fn doc_login_handler() {}

#[utoipa::path(
    post,
    path = "/users/logout",
    responses(
        (status = 200, description = "Refresh token cleared, cookies expired"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
fn doc_logout_handler() {}

#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "The authenticated account"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
fn doc_me_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_register_handler,
        doc_login_handler,
        doc_logout_handler,
        doc_me_handler
    ),
    components(schemas(LoginRequest, LoginData)),
    tags((name = "Users", description = "Registration and session management"))
)]
pub struct UsersApiDoc;
