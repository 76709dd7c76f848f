//! Access gate: the request-pipeline stage that protects routes.
//!
//! Paths are statically partitioned into three sets: `public` (always
//! allowed), auth-only (login/register, allowed only when *not*
//! authenticated) and protected (the default, allowed only when
//! authenticated). Classification is by prefix match: a path matches an
//! entry when it equals the entry or starts with `entry + "/"`.
//!
//! The decision itself is a pure function of `(path, authenticated)`; the
//! axum middleware around it only resolves token validity and turns the
//! decision into a response. Invalid or expired tokens fold into "not
//! authenticated" and never produce an error.

use crate::api::handlers::auth::{extract_session_token, AuthState};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use std::sync::Arc;
use url::form_urlencoded;

/// Routes reachable without authentication.
pub const DEFAULT_PUBLIC_ROUTES: &[&str] = &["/", "/login", "/register", "/api/auth"];

/// Routes only meant for users who are not signed in yet.
pub const DEFAULT_AUTH_ROUTES: &[&str] = &["/login", "/register"];

/// Paths the gate never inspects (static assets and service plumbing).
/// This list is configuration, not access logic.
pub const DEFAULT_EXCLUDED_ROUTES: &[&str] = &[
    "/health",
    "/favicon.ico",
    "/static",
    "/assets",
    "/docs",
    "/api-docs",
];

const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_DASHBOARD_PATH: &str = "/dashboard";
const CALLBACK_PARAM: &str = "callbackUrl";

/// Static route classification plus redirect targets.
#[derive(Debug, Clone)]
pub struct GateConfig {
    public_routes: Vec<String>,
    auth_routes: Vec<String>,
    excluded_routes: Vec<String>,
    login_path: String,
    dashboard_path: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            public_routes: DEFAULT_PUBLIC_ROUTES.iter().map(ToString::to_string).collect(),
            auth_routes: DEFAULT_AUTH_ROUTES.iter().map(ToString::to_string).collect(),
            excluded_routes: DEFAULT_EXCLUDED_ROUTES
                .iter()
                .map(ToString::to_string)
                .collect(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            dashboard_path: DEFAULT_DASHBOARD_PATH.to_string(),
        }
    }
}

impl GateConfig {
    /// True when the gate should not inspect the path at all.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_routes
            .iter()
            .any(|route| matches_route(path, route))
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn dashboard_path(&self) -> &str {
        &self.dashboard_path
    }
}

/// Outcome of the access gate for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToDashboard,
    RedirectToLogin { callback: String },
}

/// Prefix-match rule: the path matches an entry when it equals the entry or
/// starts with `entry + "/"`. Note `"/"` therefore only matches exactly.
fn matches_route(path: &str, route: &str) -> bool {
    path == route || path.starts_with(&format!("{route}/"))
}

/// Decide what to do with a request, given only the path and whether the
/// caller holds a valid trust token. Pure: no side effects, no lookups.
///
/// Rule order matters: `/login` and `/register` are both public and
/// auth-only, so the dashboard redirect wins when authenticated and the
/// public allowance wins when not.
#[must_use]
pub fn decide(path: &str, authenticated: bool, config: &GateConfig) -> GateDecision {
    let is_auth_route = config
        .auth_routes
        .iter()
        .any(|route| matches_route(path, route));

    if is_auth_route && authenticated {
        return GateDecision::RedirectToDashboard;
    }

    let is_public_route = config
        .public_routes
        .iter()
        .any(|route| matches_route(path, route));

    if !is_public_route && !authenticated {
        return GateDecision::RedirectToLogin {
            callback: path.to_string(),
        };
    }

    GateDecision::Allow
}

/// Axum middleware wrapping [`decide`].
///
/// Token validation failures (missing, corrupt, expired) are treated exactly
/// like "no token": the request proceeds as unauthenticated.
pub(crate) async fn access_gate(
    Extension(config): Extension<Arc<GateConfig>>,
    Extension(auth_state): Extension<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if config.is_excluded(&path) {
        return next.run(request).await;
    }

    let authenticated = extract_session_token(request.headers())
        .is_some_and(|token| auth_state.keys().validate(&token).is_some());

    match decide(&path, authenticated, &config) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToDashboard => {
            Redirect::temporary(config.dashboard_path()).into_response()
        }
        GateDecision::RedirectToLogin { callback } => {
            let query: String = form_urlencoded::Serializer::new(String::new())
                .append_pair(CALLBACK_PARAM, &callback)
                .finish();
            Redirect::temporary(&format!("{}?{query}", config.login_path())).into_response()
        }
    }
}
