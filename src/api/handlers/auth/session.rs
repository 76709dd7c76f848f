//! Session endpoints and cookie plumbing for the trust token.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use super::{
    error::AuthError,
    state::{AuthConfig, AuthState},
    storage::{find_user_by_id, UserRecord},
    types::SessionResponse,
};

const SESSION_COOKIE_NAME: &str = "guarita_session";

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn session(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Response, AuthError> {
    match authenticate_session(&headers, &pool, &auth_state).await? {
        Some(user) => Ok((
            StatusCode::OK,
            Json(SessionResponse { user: user.into() }),
        )
            .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Resolve the request's trust token into a live user record.
///
/// A missing, corrupt or expired token folds into `Ok(None)`; so does a
/// token whose user no longer exists. Only a store fault is an error.
pub(crate) async fn authenticate_session(
    headers: &HeaderMap,
    pool: &PgPool,
    auth_state: &AuthState,
) -> Result<Option<UserRecord>, AuthError> {
    let Some(token) = extract_session_token(headers) else {
        return Ok(None);
    };
    let Some(user_id) = auth_state.keys().validate(&token) else {
        return Ok(None);
    };
    Ok(find_user_by_id(pool, user_id).await?)
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // The token is stateless, so there is nothing to revoke server-side;
    // clearing the cookie ends the browser session.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(auth_state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers)
}

/// Build a secure `HttpOnly` cookie carrying the trust token.
pub(super) fn session_cookie(
    auth_state: &AuthState,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = auth_state.config().session_ttl_seconds();
    // Only mark cookies secure when the deployment is served over HTTPS.
    let secure = auth_state.config().session_cookie_secure();
    // Trust tokens are dot-separated base64url JWT segments, so they contain
    // no ';', ',', whitespace or control bytes and need no escaping here.
    debug_assert!(token.bytes().all(|b| b.is_ascii_graphic() && b != b';'));
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(auth_config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = auth_config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Pull the trust token from the `Authorization` header or session cookie.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let Some(key) = parts.next() else { continue };
        // A bare pair without '=' (e.g. "flag") is skipped, not fatal
        let Some(val) = parts.next() else { continue };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};
    use secrecy::SecretString;

    fn auth_state(secure: bool) -> AuthState {
        AuthState::new(
            AuthConfig::new(SecretString::from("test-secret".to_string()))
                .with_session_ttl_seconds(3600)
                .with_cookie_secure(secure),
        )
    }

    #[test]
    fn session_cookie_is_http_only_with_ttl() -> Result<()> {
        let cookie = session_cookie(&auth_state(false), "token-value")?;
        let value = cookie.to_str().context("cookie should be ascii")?;
        assert!(value.starts_with("guarita_session=token-value"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=3600"));
        assert!(!value.contains("Secure"));
        Ok(())
    }

    #[test]
    fn session_cookie_secure_when_configured() -> Result<()> {
        let cookie = session_cookie(&auth_state(true), "token-value")?;
        let value = cookie.to_str().context("cookie should be ascii")?;
        assert!(value.ends_with("; Secure"));
        Ok(())
    }

    #[test]
    fn clear_cookie_expires_immediately() -> Result<()> {
        let state = auth_state(false);
        let cookie = clear_session_cookie(state.config())?;
        let value = cookie.to_str().context("cookie should be ascii")?;
        assert!(value.contains("guarita_session=;"));
        assert!(value.contains("Max-Age=0"));
        Ok(())
    }

    #[test]
    fn extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; guarita_session=abc123; theme=dark"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn extract_token_skips_valueless_cookie_pairs() {
        // document.cookie = "flag" produces a pair with no '='
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("flag; guarita_session=abc123"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("guarita_session=abc123; flag"));
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn extract_token_prefers_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(
            COOKIE,
            HeaderValue::from_static("guarita_session=from-cookie"),
        );
        assert_eq!(
            extract_session_token(&headers),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn extract_token_none_when_absent() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_session_token(&headers), None);
    }
}
