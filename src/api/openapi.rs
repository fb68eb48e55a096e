//! OpenAPI document for the auth API, served through swagger-ui at `/docs`.

use utoipa::OpenApi;

use super::handlers::{dashboard, health, login, logout, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::create_user,
        login::login,
        logout::logout,
        dashboard::dashboard,
    ),
    components(schemas(
        health::Health,
        users::CreateUserRequest,
        users::CreateUserResponse,
        users::CreatedUser,
        login::LoginRequest,
        login::LoginResponse,
        dashboard::DashboardResponse,
    )),
    tags(
        (name = "users", description = "Signup"),
        (name = "auth", description = "Login and logout"),
        (name = "dashboard", description = "Protected resources"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
