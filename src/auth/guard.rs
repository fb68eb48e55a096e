//! Route guard middleware for protected paths.
//!
//! Runs on every request; paths outside the protected prefix pass through
//! untouched. Protected paths need a valid session cookie or the client is
//! redirected to the login page. Verification is pure signature/expiry
//! checking, never a database round-trip.

use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    session::extract_session_token,
    state::AuthState,
    token::{self, VerifyError},
};

/// Gate requests under the protected prefix on a valid session token.
///
/// Every verification failure looks the same to the client (redirect to
/// login); the distinction between missing, expired and invalid tokens only
/// shows up in the logs.
pub async fn guard(
    Extension(state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !is_protected(state.config().protected_prefix(), path) {
        return next.run(request).await;
    }

    let Some(cookie) = extract_session_token(request.headers()) else {
        debug!("No session token found, redirecting to login");
        return Redirect::temporary(state.config().login_path()).into_response();
    };

    match token::verify(state.config().jwt_secret(), &cookie) {
        Ok(claims) => {
            debug!(user_id = %claims.sub, "Session token verified");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(VerifyError::Expired) => {
            debug!("Session token expired, redirecting to login");
            Redirect::temporary(state.config().login_path()).into_response()
        }
        Err(VerifyError::Invalid) => {
            warn!("Session token verification failed, redirecting to login");
            Redirect::temporary(state.config().login_path()).into_response()
        }
    }
}

/// A path is protected when it equals the prefix or sits underneath it.
fn is_protected(prefix: &str, path: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching() {
        assert!(is_protected("/dashboard", "/dashboard"));
        assert!(is_protected("/dashboard", "/dashboard/reports"));
        assert!(is_protected("/dashboard", "/dashboard/reports/2024"));
        assert!(!is_protected("/dashboard", "/dashboards"));
        assert!(!is_protected("/dashboard", "/login"));
        assert!(!is_protected("/dashboard", "/"));
        assert!(!is_protected("/dashboard", "/api/auth/login"));
    }
}
