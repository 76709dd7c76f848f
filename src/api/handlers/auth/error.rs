//! Error taxonomy for the auth endpoints.
//!
//! Every handler path terminates in one of these variants; collaborator
//! faults (store, hasher, token signer) map to `Internal` and are logged
//! with detail while the caller only sees a generic failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use super::types::{ErrorResponse, FieldError};

/// Internal reason a login was rejected. Never exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    NotFound,
    BadPassword,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input")]
    InvalidInput(Vec<FieldError>),

    #[error("invalid credentials")]
    InvalidCredentials(CredentialFailure),

    #[error("email already in use")]
    EmailTaken,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub(crate) fn missing_payload() -> Self {
        Self::InvalidInput(vec![FieldError::new("body", "Missing payload")])
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidInput(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: "Invalid input".to_string(),
                    errors: Some(errors),
                }),
            )
                .into_response(),
            Self::InvalidCredentials(reason) => {
                // The precise reason stays in the logs; the response never
                // distinguishes an unknown email from a wrong password.
                debug!("login rejected: {:?}", reason);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        message: "Invalid credentials".to_string(),
                        errors: None,
                    }),
                )
                    .into_response()
            }
            Self::EmailTaken => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    message: "Email already in use".to_string(),
                    errors: None,
                }),
            )
                .into_response(),
            Self::Internal(err) => {
                error!("internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Internal server error".to_string(),
                        errors: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use axum::body::to_bytes;

    async fn body_of(error: AuthError) -> Result<(StatusCode, String)> {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, String::from_utf8(bytes.to_vec())?))
    }

    #[tokio::test]
    async fn invalid_input_is_400_with_field_errors() -> Result<()> {
        let (status, body) = body_of(AuthError::InvalidInput(vec![FieldError::new(
            "password",
            "Password must be at least 6 characters",
        )]))
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("password"));
        assert!(body.contains("at least 6 characters"));
        Ok(())
    }

    #[tokio::test]
    async fn credential_failures_are_indistinguishable_externally() -> Result<()> {
        let (not_found_status, not_found_body) =
            body_of(AuthError::InvalidCredentials(CredentialFailure::NotFound)).await?;
        let (bad_password_status, bad_password_body) = body_of(AuthError::InvalidCredentials(
            CredentialFailure::BadPassword,
        ))
        .await?;

        assert_eq!(not_found_status, StatusCode::UNAUTHORIZED);
        assert_eq!(not_found_status, bad_password_status);
        assert_eq!(not_found_body, bad_password_body);
        assert!(not_found_body.contains("Invalid credentials"));
        Ok(())
    }

    #[tokio::test]
    async fn email_taken_is_409() -> Result<()> {
        let (status, body) = body_of(AuthError::EmailTaken).await?;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("Email already in use"));
        Ok(())
    }

    #[tokio::test]
    async fn internal_hides_detail() -> Result<()> {
        let (status, body) = body_of(AuthError::Internal(anyhow!("pool exhausted"))).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("pool exhausted"));
        assert!(body.contains("Internal server error"));
        Ok(())
    }
}
