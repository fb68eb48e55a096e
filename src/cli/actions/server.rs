//! Server action: turn validated CLI arguments into a running service.

use anyhow::Result;
use secrecy::SecretString;

use crate::{
    api,
    auth::AuthConfig,
    cli::actions::Action,
};

/// Validated server arguments produced by dispatch.
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: SecretString,
    pub session_ttl_seconds: u64,
    pub protected_prefix: String,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("dsn", &self.dsn)
            .field("jwt_secret", &"***")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("protected_prefix", &self.protected_prefix)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// Handle the server action.
///
/// # Errors
/// Returns an error if the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    let Action::Server(args) = action;

    let auth_config = AuthConfig::new(
        args.jwt_secret,
        args.session_ttl_seconds,
        args.cookie_secure,
        args.protected_prefix,
    );

    api::new(args.port, args.dsn, auth_config).await
}
