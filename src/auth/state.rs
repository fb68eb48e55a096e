//! Shared authentication configuration handed to handlers and the guard.

use secrecy::SecretString;

/// Validated auth configuration, built once at startup from CLI/env.
#[derive(Clone)]
pub struct AuthConfig {
    jwt_secret: SecretString,
    session_ttl_seconds: u64,
    cookie_secure: bool,
    protected_prefix: String,
    login_path: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(
        jwt_secret: SecretString,
        session_ttl_seconds: u64,
        cookie_secure: bool,
        protected_prefix: String,
    ) -> Self {
        Self {
            jwt_secret,
            session_ttl_seconds,
            cookie_secure,
            protected_prefix,
            login_path: "/login".to_string(),
        }
    }

    #[must_use]
    pub const fn jwt_secret(&self) -> &SecretString {
        &self.jwt_secret
    }

    #[must_use]
    pub const fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub const fn session_cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    #[must_use]
    pub fn protected_prefix(&self) -> &str {
        &self.protected_prefix
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("cookie_secure", &self.cookie_secure)
            .field("protected_prefix", &self.protected_prefix)
            .field("login_path", &self.login_path)
            .finish()
    }
}

/// Request-scoped handle to the auth configuration.
#[derive(Debug, Clone)]
pub struct AuthState {
    config: AuthConfig,
}

impl AuthState {
    #[must_use]
    pub const fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }
}
