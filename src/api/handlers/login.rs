//! Login handler: `POST /api/auth/login`.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tracing::{debug, info_span, instrument, Instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::ApiError;
use crate::auth::{password, policy, session, token, AuthState};

#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 400, description = "Validation failure, unknown user or wrong password"),
        (status = 500, description = "Unexpected failure"),
    ),
    tag = "auth"
)]
#[instrument(skip(pool, auth_state, payload))]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<(StatusCode, HeaderMap, Json<LoginResponse>), ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Corpo da requisição ausente.".to_string()));
    };

    let email = validate(&request).map_err(ApiError::Validation)?;

    let query = "SELECT id, password_hash FROM users WHERE email = $1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(&email)
        .fetch_optional(&*pool)
        .instrument(span)
        .await?;

    let Some(row) = row else {
        return Err(ApiError::Authentication("Usuário não encontrado.".to_string()));
    };

    let user_id: Uuid = row.get("id");
    let password_hash: String = row.get("password_hash");

    if !password::verify(request.password, password_hash).await? {
        return Err(ApiError::Authentication("Senha incorreta.".to_string()));
    }

    let config = auth_state.config();
    let jwt = token::issue(config.jwt_secret(), user_id, config.session_ttl_seconds())?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session::session_cookie(config, &jwt)
            .map_err(|err| ApiError::Unexpected(err.into()))?,
    );

    debug!(user_id = %user_id, "Login successful");

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse {
            message: "Login realizado com sucesso!".to_string(),
            token: jwt,
        }),
    ))
}

/// Shape/policy validation before the store is touched. Uses the same
/// centralized password policy as signup, so a password that could never
/// have been accepted at signup is rejected without a lookup.
fn validate(request: &LoginRequest) -> Result<String, String> {
    let email = request.email.trim();
    if !policy::valid_email(email) {
        return Err("Email inválido.".to_string());
    }

    if request.password.is_empty() {
        return Err("A senha é obrigatória.".to_string());
    }
    if !policy::PasswordRequirements::evaluate(&request.password).all() {
        return Err("Senha inválida.".to_string());
    }

    Ok(email.to_string())
}
