use crate::{
    api,
    api::handlers::auth::AuthConfig,
    cli::{actions::Action, telemetry},
};
use anyhow::Result;

/// Execute the server action.
///
/// # Errors
/// Returns an error if the database connection or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            session_secret,
            session_ttl_seconds,
            secure_cookies,
        } => {
            let auth_config = AuthConfig::new(session_secret)
                .with_session_ttl_seconds(session_ttl_seconds)
                .with_cookie_secure(secure_cookies);

            api::new(port, dsn, auth_config).await?;
        }
    }

    telemetry::shutdown_tracer();

    Ok(())
}
