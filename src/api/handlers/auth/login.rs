use anyhow::{anyhow, Context};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, instrument};

use super::{
    error::{AuthError, CredentialFailure},
    password,
    session::session_cookie,
    state::AuthState,
    storage::{find_user_by_email, UserRecord},
    types::{ErrorResponse, LoginRequest, LoginResponse},
    validate::{normalize_email, validate_login},
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(pool, auth_state))]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Response, AuthError> {
    let Some(Json(request)) = payload else {
        return Err(AuthError::missing_payload());
    };

    debug!("login request: {:?}", request);

    let email = normalize_email(&request.email);

    let errors = validate_login(&email, &request.password);
    if !errors.is_empty() {
        return Err(AuthError::InvalidInput(errors));
    }

    let user = verify_credentials(&pool, &email, request.password).await?;

    let token = auth_state.keys().issue(user.id)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie(&auth_state, &token)
            .map_err(|err| anyhow!("failed to build session cookie: {err}"))?,
    );

    info!(user_id = %user.id, "login successful");

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user: user.into(),
        }),
    )
        .into_response())
}

/// Credential verifier: look the user up by (normalized) email, then compare
/// the provided plaintext against the stored argon2 hash.
///
/// The two failure reasons stay distinguishable here for logging; callers
/// must surface them through [`AuthError::InvalidCredentials`] so the
/// external message is identical for both.
pub(crate) async fn verify_credentials(
    pool: &PgPool,
    email: &str,
    plaintext: String,
) -> Result<UserRecord, AuthError> {
    let Some(user) = find_user_by_email(pool, email).await? else {
        return Err(AuthError::InvalidCredentials(CredentialFailure::NotFound));
    };

    let stored_hash = user.password_hash.clone();
    let password_matches = task::spawn_blocking(move || password::verify(&plaintext, &stored_hash))
        .await
        .context("password verification task failed")??;

    if password_matches {
        Ok(user)
    } else {
        Err(AuthError::InvalidCredentials(CredentialFailure::BadPassword))
    }
}
