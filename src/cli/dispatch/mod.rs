//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use anyhow::{anyhow, Result};
use secrecy::SecretString;

use crate::cli::actions::{server, Action};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --dsn"))?;

    // Refuse to start without a signing secret; there is no fallback value.
    let jwt_secret = matches
        .get_one::<String>("jwt-secret")
        .map(|secret| SecretString::from(secret.clone()))
        .ok_or_else(|| anyhow!("missing required argument: --jwt-secret"))?;

    let protected_prefix = matches
        .get_one::<String>("protected-prefix")
        .cloned()
        .unwrap_or_else(|| "/dashboard".to_string());
    if !protected_prefix.starts_with('/') {
        return Err(anyhow!("protected prefix must start with '/'"));
    }

    Ok(Action::Server(server::Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        dsn,
        jwt_secret,
        session_ttl_seconds: matches
            .get_one::<u64>("session-ttl")
            .copied()
            .unwrap_or(604_800),
        protected_prefix,
        cookie_secure: matches.get_flag("cookie-secure"),
    }))
}
