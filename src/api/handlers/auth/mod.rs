//! Auth handlers and supporting modules.
//!
//! Registration and login are the two write paths; both validate input with
//! explicit per-field validators, talk to the user store through
//! [`storage`], and hash/compare passwords with argon2 in [`password`].
//! Successful logins issue a signed trust token ([`token`]) delivered as an
//! `HttpOnly` cookie ([`session`]); the access gate validates the same token
//! on every request.
//!
//! Login failures collapse "unknown email" and "wrong password" into a
//! single external message; the precise reason only reaches the logs.

mod error;
pub(crate) mod login;
mod password;
pub(crate) mod register;
pub(crate) mod session;
mod state;
mod storage;
mod token;
pub(crate) mod types;
mod validate;

pub use error::{AuthError, CredentialFailure};
pub use login::login;
pub use register::register;
pub use session::{logout, session};
pub use state::{AuthConfig, AuthState};
pub use token::TokenKeys;
pub use types::{
    ErrorResponse, FieldError, LoginRequest, LoginResponse, PublicUser, RegisterRequest,
    RegisterResponse, SessionResponse,
};

pub(crate) use session::{authenticate_session, extract_session_token};
