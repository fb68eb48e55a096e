//! Error taxonomy for the API boundary.
//!
//! Validation, conflict and authentication failures carry the first
//! violated rule's message back to the client. Unexpected failures are
//! logged in full and collapsed to a generic message so internals never
//! leak into a response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Field-level validation failure; client-fixable.
    Validation(String),
    /// Duplicate email on signup.
    Conflict(String),
    /// Unknown user, wrong password.
    Authentication(String),
    /// Store unavailable, hashing failure, anything else.
    Unexpected(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) | Self::Authentication(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(message)
            | Self::Conflict(message)
            | Self::Authentication(message) => message,
            Self::Unexpected(err) => {
                error!("Unexpected error handling request: {err:?}");
                "Erro interno. Tente novamente mais tarde.".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unexpected(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unexpected(err.into())
    }
}
