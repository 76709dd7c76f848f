use anyhow::Context;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sqlx::PgPool;
use tokio::task;
use tracing::{debug, info, instrument};

use super::{
    error::AuthError,
    password,
    storage::{find_user_by_email, insert_user, InsertOutcome},
    types::{ErrorResponse, RegisterRequest, RegisterResponse},
    validate::{normalize_email, validate_register},
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = RegisterResponse, content_type = "application/json"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "A user with the specified email already exists", body = ErrorResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(pool))]
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<Response, AuthError> {
    let Some(Json(request)) = payload else {
        return Err(AuthError::missing_payload());
    };

    debug!("register request: {:?}", request);

    let name = request.name.trim().to_string();
    let email = normalize_email(&request.email);

    let errors = validate_register(&name, &email, &request.password);
    if !errors.is_empty() {
        return Err(AuthError::InvalidInput(errors));
    }

    // Fast-path duplicate check; the unique constraint stays authoritative
    // for racing registrations.
    if find_user_by_email(&pool, &email).await?.is_some() {
        return Err(AuthError::EmailTaken);
    }

    let plaintext = request.password;
    let password_hash = task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .context("password hashing task failed")??;

    match insert_user(&pool, &name, &email, &password_hash).await? {
        InsertOutcome::Created(user) => {
            info!(user_id = %user.id, "user registered");
            Ok((
                StatusCode::CREATED,
                Json(RegisterResponse {
                    message: "User created".to_string(),
                    user: user.into(),
                }),
            )
                .into_response())
        }
        InsertOutcome::EmailTaken => Err(AuthError::EmailTaken),
    }
}
