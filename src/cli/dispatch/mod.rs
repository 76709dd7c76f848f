//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action executed by the binary.

use crate::cli::actions::Action;
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let session_secret = matches
        .get_one::<String>("session-secret")
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --session-secret")?;

    let session_ttl_seconds = matches
        .get_one::<u64>("session-ttl")
        .copied()
        .unwrap_or(43200);

    Ok(Action::Server {
        port,
        dsn,
        session_secret,
        session_ttl_seconds,
        secure_cookies: matches.get_flag("secure-cookies"),
    })
}
