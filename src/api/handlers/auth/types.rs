//! Request/response types for auth endpoints.
//!
//! Request types carry the plaintext password for the duration of one call;
//! their `Debug` impls mask it so it can never leak into spans or logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::storage::UserRecord;

#[derive(ToSchema, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The user fields safe to return to callers. There is deliberately no way
/// to build this with a password hash in it.
#[derive(ToSchema, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<UserRecord> for PublicUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct SessionResponse {
    pub user: PublicUser,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}
