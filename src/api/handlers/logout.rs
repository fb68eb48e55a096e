//! Logout handler: `POST /api/auth/logout`.
//!
//! Tokens are stateless, so there is nothing to revoke server-side; logout
//! clears the session cookie and nothing else.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

use crate::auth::{session, AuthState};

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cookie cleared"),
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    match session::clear_session_cookie(auth_state.config()) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build clearing cookie: {err}");
        }
    }
    (StatusCode::NO_CONTENT, headers)
}
