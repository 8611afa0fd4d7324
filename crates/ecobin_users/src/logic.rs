//! Request/response shapes and pure validation for the identity endpoints.

use ecobin_common::models::User;
use ecobin_common::{error::validation_error, ApiError};
use serde::{Deserialize, Serialize};

/// Fields collected from the multipart registration form.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub avatar_file_name: Option<String>,
    pub avatar_bytes: Option<Vec<u8>>,
}

impl RegistrationForm {
    /// Reject blank fields and a missing avatar, and normalize the
    /// identifying fields (username and email are stored lowercased).
    pub fn validate(mut self) -> Result<Self, ApiError> {
        let blank = [
            &self.username,
            &self.email,
            &self.full_name,
            &self.password,
        ]
        .iter()
        .any(|f| f.trim().is_empty());
        if blank {
            return Err(validation_error("All fields are required"));
        }
        if !self.email.contains('@') {
            return Err(validation_error("Invalid email address"));
        }
        if self.avatar_bytes.as_ref().map_or(true, |b| b.is_empty()) {
            return Err(validation_error("Avatar file is required"));
        }

        self.username = self.username.trim().to_lowercase();
        self.email = self.email.trim().to_lowercase();
        self.full_name = self.full_name.trim().to_string();
        Ok(self)
    }
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns the lookup key (username preferred over email) and the
    /// password, or a 400 when either is missing.
    pub fn validate(&self) -> Result<(LoginKey<'_>, &str), ApiError> {
        let password = self
            .password
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| validation_error("Password is required"))?;

        if let Some(username) = self.username.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok((LoginKey::Username(username), password));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            return Ok((LoginKey::Email(email), password));
        }
        Err(validation_error("Username or email is required"))
    }
}

/// How the account is looked up at login.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginKey<'a> {
    Username(&'a str),
    Email(&'a str),
}

/// Body of a successful login. Tokens are also set as HttpOnly cookies.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
