//! # Guarita
//!
//! `guarita` is a small credential-based authentication service: user
//! registration, password-hashed login, session issuance, and route
//! protection for a web application.
//!
//! ## Access Gate
//!
//! Every request passes through a pipeline stage that classifies the path
//! (`public`, auth-only, protected by default) and decides between letting
//! the request through, redirecting authenticated users away from the
//! login/register pages, or redirecting unauthenticated users to the login
//! page with a `callbackUrl` pointing back at the original path.
//!
//! ## Credentials
//!
//! Passwords are hashed with argon2 and only the PHC-encoded hash is stored.
//! A successful login issues a signed trust token (JWT) delivered as an
//! `HttpOnly` session cookie; the gate only validates tokens, it never mints
//! them. Login failures collapse "unknown email" and "wrong password" into a
//! single external message to avoid account enumeration.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
