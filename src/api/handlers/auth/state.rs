//! Auth configuration and shared state.

use secrecy::SecretString;
use std::fmt;

use super::token::TokenKeys;

const DEFAULT_SESSION_TTL_SECONDS: u64 = 12 * 60 * 60;

#[derive(Clone)]
pub struct AuthConfig {
    session_secret: SecretString,
    session_ttl_seconds: u64,
    cookie_secure: bool,
}

impl AuthConfig {
    #[must_use]
    pub fn new(session_secret: SecretString) -> Self {
        Self {
            session_secret,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: false,
        }
    }

    #[must_use]
    pub const fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub const fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub const fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub const fn session_cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    pub(crate) const fn session_secret(&self) -> &SecretString {
        &self.session_secret
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &"***")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// Shared, read-only auth state: configuration plus the signing keys built
/// from it. One instance per process, shared across request handlers.
#[derive(Debug)]
pub struct AuthState {
    config: AuthConfig,
    keys: TokenKeys,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let keys = TokenKeys::new(config.session_secret(), config.session_ttl_seconds());
        Self { config, keys }
    }

    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub const fn keys(&self) -> &TokenKeys {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_masks_session_secret() {
        let config = AuthConfig::new(SecretString::from("very-secret".to_string()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));

        let state = AuthState::new(AuthConfig::new(SecretString::from(
            "very-secret".to_string(),
        )));
        let debug = format!("{state:?}");
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = AuthConfig::new(SecretString::from("secret".to_string()))
            .with_session_ttl_seconds(60)
            .with_cookie_secure(true);
        assert_eq!(config.session_ttl_seconds(), 60);
        assert!(config.session_cookie_secure());

        let state = AuthState::new(config);
        assert_eq!(state.keys().ttl_seconds(), 60);
    }
}
