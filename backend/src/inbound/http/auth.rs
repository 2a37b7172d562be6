//! Login endpoint.
//!
//! ```text
//! POST /api/auth/login {"username":"ada"}
//! ```
//!
//! Login is find-or-create: an unknown username is registered on first use.
//! No credentials or sessions are involved.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, iso_timestamp};

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ada")]
    pub username: Option<String>,
}

/// User representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "2024-05-01T10:20:30.123456")]
    pub created_at: String,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().to_string(),
            created_at: iso_timestamp(user.created_at()),
        }
    }
}

/// Successful login envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: UserPayload,
}

/// Log in, creating the user when the name is new.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing or invalid username", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let username = payload.into_inner().username.unwrap_or_default();
    let user = state.login.login(&username).await?;
    Ok(web::Json(LoginResponse {
        success: true,
        message: "Login successful".to_owned(),
        user: UserPayload::from(&user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockLoginService;
    use crate::inbound::http::configure;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::memory_state;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn login_creates_then_reuses_user() {
        let app = actix_test::init_service(
            App::new()
                .app_data(memory_state("static"))
                .configure(configure),
        )
        .await;

        let mut ids = Vec::new();
        for username in ["ada", "  ada  "] {
            let request = actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": username }))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body: LoginResponse = actix_test::read_body_json(response).await;
            assert!(body.success);
            assert_eq!(body.message, "Login successful");
            assert_eq!(body.user.username, "ada");
            ids.push(body.user.id);
        }
        assert_eq!(ids[0], ids[1]);
    }

    #[rstest]
    #[case(json!({}), "Username is required")]
    #[case(json!({"username": null}), "Username is required")]
    #[case(json!({"username": "   "}), "Username is required")]
    #[case(json!({"username": "x".repeat(81)}), "Username too long")]
    #[actix_web::test]
    async fn rejects_invalid_usernames(#[case] body: Value, #[case] message: &str) {
        let app = actix_test::init_service(
            App::new()
                .app_data(memory_state("static"))
                .configure(configure),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload: ErrorResponse = actix_test::read_body_json(response).await;
        assert_eq!(payload, ErrorResponse::new(message));
    }

    #[actix_web::test]
    async fn persistence_failures_surface_as_internal_errors() {
        let mut login_port = MockLoginService::new();
        login_port
            .expect_login()
            .times(1)
            .return_once(|_| Err(Error::internal("Login error: database error")));

        let fallback = memory_state("static");
        let ports = HttpStatePorts {
            calculator: fallback.calculator.clone(),
            login: Arc::new(login_port),
            history: fallback.history.clone(),
        };
        let state = web::Data::new(HttpState::new(ports, "static"));
        let app =
            actix_test::init_service(App::new().app_data(state).configure(configure)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": "ada"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload: ErrorResponse = actix_test::read_body_json(response).await;
        assert_eq!(payload.message, "Login error: database error");
    }
}
