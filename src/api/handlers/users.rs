//! Signup handler: `POST /api/users`.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use tracing::{debug, error, info_span, instrument, Instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::ApiError;
use crate::auth::{name, password, policy};

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    accepted_terms: bool,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct CreatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct CreateUserResponse {
    pub message: String,
    pub user: CreatedUser,
}

/// Validated and normalized signup data, ready to persist.
#[derive(Debug, PartialEq, Eq)]
struct NewUser {
    name: String,
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Validation failure or email already registered"),
        (status = 500, description = "Unexpected failure"),
    ),
    tag = "users"
)]
#[instrument(skip(pool, payload))]
pub async fn create_user(
    pool: Extension<PgPool>,
    payload: Option<Json<CreateUserRequest>>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Corpo da requisição ausente.".to_string()));
    };

    let new_user = validate(&request).map_err(ApiError::Validation)?;

    // Pre-check for a friendly conflict message; the unique constraint on
    // users.email is what actually closes the check-then-create race.
    if user_exists(&pool, &new_user.email).await? {
        return Err(ApiError::Conflict(
            "Usuário já cadastrado no banco de dados.".to_string(),
        ));
    }

    let password_hash = password::hash(new_user.password).await?;

    let query = "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let id: Uuid = match sqlx::query(query)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&password_hash)
        .fetch_one(&*pool)
        .instrument(span)
        .await
    {
        Ok(row) => row.get("id"),
        Err(err) if is_unique_violation(&err) => {
            error!("Duplicate email lost the insert race");
            return Err(ApiError::Conflict(
                "Usuário já cadastrado no banco de dados.".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    debug!(user_id = %id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "Usuário criado com sucesso!".to_string(),
            user: CreatedUser {
                id,
                name: new_user.name,
                email: new_user.email,
            },
        }),
    ))
}

/// Fail-fast field validation: the first violated rule wins.
fn validate(request: &CreateUserRequest) -> Result<NewUser, String> {
    if request.name.trim().is_empty() {
        return Err("O Nome Completo é obrigatório.".to_string());
    }

    let email = request.email.trim();
    if !policy::valid_email(email) {
        return Err("Email inválido.".to_string());
    }

    let requirements = policy::PasswordRequirements::evaluate(&request.password);
    if !requirements.has_min_length {
        return Err("A senha deve conter, no mínimo, 8 caracteres.".to_string());
    }
    if !requirements.has_upper_case {
        return Err("Deve conter ao menos uma letra maiúscula.".to_string());
    }
    if !requirements.has_lower_case {
        return Err("Deve conter ao menos uma letra minúscula.".to_string());
    }
    if !requirements.has_number {
        return Err("Deve conter ao menos um número.".to_string());
    }
    if !requirements.has_special {
        return Err("Deve conter ao menos um caractere especial.".to_string());
    }

    if request.confirm_password != request.password {
        return Err("As senhas não coincidem.".to_string());
    }

    if !request.accepted_terms {
        return Err("Você deve aceitar os termos.".to_string());
    }

    Ok(NewUser {
        name: name::normalize(&request.name),
        email: email.to_string(),
        password: request.password.clone(),
    })
}

async fn user_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let query = "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS exists";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_one(pool)
        .instrument(span)
        .await?;
    Ok(row.get("exists"))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            name: "maria da silva".to_string(),
            email: "maria@test.com".to_string(),
            password: "Abcdef1!".to_string(),
            confirm_password: "Abcdef1!".to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn valid_signup_is_normalized() {
        let user = validate(&request()).unwrap();
        assert_eq!(user.name, "Maria da Silva");
        assert_eq!(user.email, "maria@test.com");
        assert_eq!(user.password, "Abcdef1!");
    }

    #[test]
    fn empty_name_is_rejected_first() {
        let mut req = request();
        req.name = "   ".to_string();
        req.email = "broken".to_string();
        assert_eq!(
            validate(&req).unwrap_err(),
            "O Nome Completo é obrigatório."
        );
    }

    #[test]
    fn invalid_email() {
        let mut req = request();
        req.email = "maria@test".to_string();
        assert_eq!(validate(&req).unwrap_err(), "Email inválido.");
    }

    #[test]
    fn password_rules_fail_fast_in_order() {
        let cases = [
            ("Ab1!", "A senha deve conter, no mínimo, 8 caracteres."),
            ("abcdef1!", "Deve conter ao menos uma letra maiúscula."),
            ("ABCDEF1!", "Deve conter ao menos uma letra minúscula."),
            ("Abcdefg!", "Deve conter ao menos um número."),
            ("Abcdefg1", "Deve conter ao menos um caractere especial."),
        ];
        for (password, message) in cases {
            let mut req = request();
            req.password = password.to_string();
            req.confirm_password = password.to_string();
            assert_eq!(validate(&req).unwrap_err(), message, "password: {password}");
        }
    }

    #[test]
    fn mismatched_confirmation() {
        let mut req = request();
        req.confirm_password = "Abcdef1?".to_string();
        assert_eq!(validate(&req).unwrap_err(), "As senhas não coincidem.");
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut req = request();
        req.accepted_terms = false;
        assert_eq!(validate(&req).unwrap_err(), "Você deve aceitar os termos.");
    }

    #[derive(Debug)]
    struct StubDatabaseError {
        code: &'static str,
    }

    impl std::fmt::Display for StubDatabaseError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "database error with code {}", self.code)
        }
    }

    impl std::error::Error for StubDatabaseError {}

    impl sqlx::error::DatabaseError for StubDatabaseError {
        fn message(&self) -> &str {
            "stub database error"
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(self.code.into())
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            if self.code == "23505" {
                sqlx::error::ErrorKind::UniqueViolation
            } else {
                sqlx::error::ErrorKind::Other
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn database_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(StubDatabaseError { code }))
    }

    #[test]
    fn unique_violation_is_detected_by_code() {
        assert!(is_unique_violation(&database_error("23505")));
    }

    #[test]
    fn other_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&database_error("40001")));
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn request_body_uses_camel_case_keys() {
        let request: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "maria da silva",
            "email": "maria@test.com",
            "password": "Abcdef1!",
            "confirmPassword": "Abcdef1!",
            "acceptedTerms": true,
        }))
        .unwrap();
        assert!(request.accepted_terms);
        assert_eq!(request.confirm_password, "Abcdef1!");
    }
}
