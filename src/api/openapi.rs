//! OpenAPI document for the authentication API, served through Swagger UI
//! at `/docs`.

use crate::api::handlers::auth::types::{
    ErrorResponse, FieldError, LoginRequest, LoginResponse, PublicUser, RegisterRequest,
    RegisterResponse, SessionResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::auth::register::register,
        crate::api::handlers::auth::login::login,
        crate::api::handlers::auth::session::session,
        crate::api::handlers::auth::session::logout,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        PublicUser,
        RegisterResponse,
        LoginResponse,
        SessionResponse,
        ErrorResponse,
        FieldError,
    )),
    tags(
        (name = "auth", description = "Credential registration, login and sessions"),
        (name = "health", description = "Service health probe")
    )
)]
pub struct ApiDoc;
