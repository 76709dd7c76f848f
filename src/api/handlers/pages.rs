//! Minimal page endpoints fronted by the access gate.
//!
//! These are JSON stand-ins for the application's pages: the gate decides
//! who gets here, the handlers only say what the page is. `/dashboard` is
//! the one protected page and echoes the authenticated user.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::auth::{authenticate_session, AuthError, AuthState, PublicUser};

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "message": "Welcome. Sign in at /login or create an account at /register.",
    }))
}

pub async fn login_page() -> impl IntoResponse {
    Json(json!({
        "page": "login",
        "submit": "POST /api/auth/login",
    }))
}

pub async fn register_page() -> impl IntoResponse {
    Json(json!({
        "page": "register",
        "submit": "POST /api/auth/register",
    }))
}

/// Protected dashboard. The gate redirects unauthenticated requests before
/// they get here; the 401 arm only covers direct hits with a stale token.
pub async fn dashboard(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Response, AuthError> {
    let Some(user) = authenticate_session(&headers, &pool, &auth_state).await? else {
        return Ok(StatusCode::UNAUTHORIZED.into_response());
    };

    let user = PublicUser::from(user);
    Ok(Json(json!({
        "page": "dashboard",
        "message": format!("Hello, {}", user.name),
        "user": user,
    }))
    .into_response())
}
