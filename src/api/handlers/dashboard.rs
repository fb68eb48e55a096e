//! Minimal protected resource behind the route guard.
//!
//! The real dashboard is the web client's concern; this endpoint exists so
//! the guard's allow path terminates somewhere observable. The guard has
//! already verified the token and attached the claims by the time this
//! handler runs.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::token::Claims;

#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_id: String,
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Authenticated user's dashboard", body = DashboardResponse),
        (status = 307, description = "Missing or invalid session, redirected to login"),
    ),
    tag = "dashboard"
)]
pub async fn dashboard(claims: Option<Extension<Claims>>) -> impl IntoResponse {
    // Reaching this handler without claims means the guard was not mounted.
    let Some(Extension(claims)) = claims else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    Json(DashboardResponse {
        user_id: claims.sub.to_string(),
    })
    .into_response()
}
