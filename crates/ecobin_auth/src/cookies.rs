//! HttpOnly cookie helpers for the session tokens.
//!
//! Tokens travel both as cookies and in response bodies; these helpers keep
//! the cookie attributes in one place.

use axum::http::HeaderMap;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build a `Set-Cookie` value for a session token.
pub fn session_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a `Set-Cookie` value that expires a session cookie immediately.
pub fn expired_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}

/// Read a cookie value from the request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Resolve the bearer token for a request: `accessToken` cookie first, then
/// the `Authorization: Bearer` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = cookie_value(headers, ACCESS_TOKEN_COOKIE) {
        return Some(token);
    }
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{AUTHORIZATION, COOKIE};

    #[test]
    fn cookie_wins_over_authorization_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark; accessToken=abc123".parse().unwrap());
        headers.insert(AUTHORIZATION, "Bearer xyz789".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn falls_back_to_authorization_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer xyz789".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("xyz789".to_string()));
    }

    #[test]
    fn empty_cookie_is_treated_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "accessToken=".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn session_cookie_carries_security_attributes() {
        let cookie = session_cookie(ACCESS_TOKEN_COOKIE, "tok", 3600, true);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=3600"));
    }
}
