//! Calculation history endpoints.
//!
//! ```text
//! POST   /api/calculations {"username":"ada","expression":"2+2","result":"4"}
//! GET    /api/calculations/{username}
//! DELETE /api/calculations/{username}/{calculation_id}
//! DELETE /api/calculations/{username}/clear-all
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Calculation, Error, SaveCalculationRequest};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, iso_timestamp};

/// Request body for `POST /api/calculations`.
///
/// `username`, `expression` and `result` accept any JSON value; they must be
/// truthy and are stored as text.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SaveCalculationBody {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "ada")]
    pub username: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2+2")]
    pub expression: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "4")]
    pub result: Option<Value>,
    #[serde(default)]
    #[schema(example = "basic")]
    pub calculation_type: Option<String>,
    #[serde(default)]
    #[schema(example = "Quick sum")]
    pub custom_name: Option<String>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn required_text(value: Option<Value>) -> Option<String> {
    let value = value.filter(is_truthy)?;
    Some(match value {
        Value::String(text) => text,
        other => other.to_string(),
    })
}

impl TryFrom<SaveCalculationBody> for SaveCalculationRequest {
    type Error = Error;

    fn try_from(body: SaveCalculationBody) -> Result<Self, Self::Error> {
        let SaveCalculationBody {
            username,
            expression,
            result,
            calculation_type,
            custom_name,
        } = body;
        match (
            required_text(username),
            required_text(expression),
            required_text(result),
        ) {
            (Some(username), Some(expression), Some(result)) => Ok(Self {
                username,
                expression,
                result,
                calculation_type,
                custom_name,
            }),
            _ => Err(Error::invalid_request("Missing required fields")),
        }
    }
}

/// Calculation as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalculationPayload {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "2+2")]
    pub expression: String,
    #[schema(example = "4")]
    pub result: String,
    #[schema(example = "basic")]
    pub calculation_type: String,
    pub custom_name: Option<String>,
    #[schema(example = "2024-05-01T10:20:30.123456")]
    pub created_at: String,
}

impl From<&Calculation> for CalculationPayload {
    fn from(calculation: &Calculation) -> Self {
        Self {
            id: calculation.id.get(),
            expression: calculation.expression.clone(),
            result: calculation.result.clone(),
            calculation_type: calculation.kind.as_ref().to_owned(),
            custom_name: calculation.custom_name.clone(),
            created_at: iso_timestamp(calculation.created_at),
        }
    }
}

/// Saved calculation summary; the kind is not echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedCalculationPayload {
    pub id: i32,
    pub expression: String,
    pub result: String,
    pub custom_name: Option<String>,
    pub created_at: String,
}

impl From<&Calculation> for SavedCalculationPayload {
    fn from(calculation: &Calculation) -> Self {
        Self {
            id: calculation.id.get(),
            expression: calculation.expression.clone(),
            result: calculation.result.clone(),
            custom_name: calculation.custom_name.clone(),
            created_at: iso_timestamp(calculation.created_at),
        }
    }
}

/// Envelope for `POST /api/calculations`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveCalculationResponse {
    pub success: bool,
    #[schema(example = "Calculation saved successfully")]
    pub message: String,
    pub calculation: SavedCalculationPayload,
}

/// Envelope for `GET /api/calculations/{username}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListCalculationsResponse {
    pub success: bool,
    pub calculations: Vec<CalculationPayload>,
    pub total: usize,
}

/// Envelope for single deletes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteCalculationResponse {
    pub success: bool,
    #[schema(example = "Calculation deleted successfully")]
    pub message: String,
}

/// Envelope for `DELETE /api/calculations/{username}/clear-all`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClearCalculationsResponse {
    pub success: bool,
    #[schema(example = "Successfully deleted 3 calculations")]
    pub message: String,
    pub deleted_count: u64,
}

/// Save a calculation for an existing user.
#[utoipa::path(
    post,
    path = "/api/calculations",
    request_body = SaveCalculationBody,
    responses(
        (status = 200, description = "Calculation saved", body = SaveCalculationResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["calculations"],
    operation_id = "saveCalculation"
)]
#[post("/api/calculations")]
pub async fn save_calculation(
    state: web::Data<HttpState>,
    payload: web::Json<SaveCalculationBody>,
) -> ApiResult<web::Json<SaveCalculationResponse>> {
    let request = SaveCalculationRequest::try_from(payload.into_inner())?;
    let saved = state.history.save(request).await?;
    Ok(web::Json(SaveCalculationResponse {
        success: true,
        message: "Calculation saved successfully".to_owned(),
        calculation: SavedCalculationPayload::from(&saved),
    }))
}

/// List a user's calculations, newest first.
#[utoipa::path(
    get,
    path = "/api/calculations/{username}",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "Calculation history", body = ListCalculationsResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["calculations"],
    operation_id = "listCalculations"
)]
#[get("/api/calculations/{username}")]
pub async fn list_calculations(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListCalculationsResponse>> {
    let username = path.into_inner();
    let calculations: Vec<CalculationPayload> = state
        .history
        .list(&username)
        .await?
        .iter()
        .map(CalculationPayload::from)
        .collect();
    Ok(web::Json(ListCalculationsResponse {
        success: true,
        total: calculations.len(),
        calculations,
    }))
}

/// Delete every calculation belonging to a user.
#[utoipa::path(
    delete,
    path = "/api/calculations/{username}/clear-all",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "Calculations deleted", body = ClearCalculationsResponse),
        (status = 400, description = "No calculations to delete", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["calculations"],
    operation_id = "clearCalculations"
)]
#[delete("/api/calculations/{username}/clear-all")]
pub async fn clear_calculations(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClearCalculationsResponse>> {
    let username = path.into_inner();
    let deleted_count = state.history.clear_all(&username).await?;
    Ok(web::Json(ClearCalculationsResponse {
        success: true,
        message: format!("Successfully deleted {deleted_count} calculations"),
        deleted_count,
    }))
}

/// Delete one of a user's calculations.
#[utoipa::path(
    delete,
    path = "/api/calculations/{username}/{calculation_id}",
    params(
        ("username" = String, Path, description = "Exact username"),
        ("calculation_id" = i64, Path, description = "Calculation identifier")
    ),
    responses(
        (status = 200, description = "Calculation deleted", body = DeleteCalculationResponse),
        (status = 404, description = "User or calculation not found", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["calculations"],
    operation_id = "deleteCalculation"
)]
#[delete("/api/calculations/{username}/{calculation_id:\\d+}")]
pub async fn delete_calculation(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<DeleteCalculationResponse>> {
    let (username, raw_id) = path.into_inner();
    // Digit runs beyond i64 cannot name a stored record either.
    let calculation_id = raw_id.parse::<i64>().unwrap_or(i64::MAX);
    debug!(%username, calculation_id, "deleting calculation");
    state.history.delete(&username, calculation_id).await?;
    Ok(web::Json(DeleteCalculationResponse {
        success: true,
        message: "Calculation deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCalculationHistory;
    use crate::inbound::http::configure;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::memory_state;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    async fn send<S>(app: &S, request: actix_web::test::TestRequest) -> (StatusCode, Value)
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let response = actix_test::call_service(app, request.to_request()).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    async fn login<S>(app: &S, username: &str)
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let (status, _) = send(
            app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": username })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    fn save(body: Value) -> actix_web::test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/api/calculations")
            .set_json(body)
    }

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(""), false)]
    #[case(json!([]), false)]
    #[case(json!({}), false)]
    #[case(json!(true), true)]
    #[case(json!(-1.5), true)]
    #[case(json!("0"), true)]
    #[case(json!([0]), true)]
    fn truthiness_follows_json_value(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }

    #[rstest]
    #[case(json!("4"), "4")]
    #[case(json!(4), "4")]
    #[case(json!(2.5), "2.5")]
    #[case(json!(true), "true")]
    fn results_are_stored_as_text(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(required_text(Some(value)).as_deref(), Some(expected));
    }

    #[actix_web::test]
    async fn save_list_delete_and_clear_round_trip() {
        let app = actix_test::init_service(
            App::new()
                .app_data(memory_state("static"))
                .configure(configure),
        )
        .await;
        login(&app, "ada").await;

        let (status, first) = send(
            &app,
            save(json!({"username": "ada", "expression": "2+2", "result": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["message"], json!("Calculation saved successfully"));
        assert_eq!(first["calculation"]["result"], json!("4"));
        assert_eq!(first["calculation"]["custom_name"], Value::Null);
        assert!(first["calculation"].get("calculation_type").is_none());

        let (_, second) = send(
            &app,
            save(json!({
                "username": "ada",
                "expression": "sqrt(16)",
                "result": "4",
                "calculation_type": "scientific",
                "custom_name": "root"
            })),
        )
        .await;

        let (status, listed) = send(
            &app,
            actix_test::TestRequest::get().uri("/api/calculations/ada"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["total"], json!(2));
        assert_eq!(listed["calculations"][0]["id"], second["calculation"]["id"]);
        assert_eq!(
            listed["calculations"][0]["calculation_type"],
            json!("scientific")
        );
        assert_eq!(listed["calculations"][1]["calculation_type"], json!("basic"));

        let first_id = first["calculation"]["id"].as_i64().expect("id");
        let (status, deleted) = send(
            &app,
            actix_test::TestRequest::delete().uri(&format!("/api/calculations/ada/{first_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            deleted,
            json!({"success": true, "message": "Calculation deleted successfully"})
        );

        let (status, cleared) = send(
            &app,
            actix_test::TestRequest::delete().uri("/api/calculations/ada/clear-all"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            cleared,
            json!({
                "success": true,
                "message": "Successfully deleted 1 calculations",
                "deleted_count": 1
            })
        );

        let (status, empty) = send(
            &app,
            actix_test::TestRequest::delete().uri("/api/calculations/ada/clear-all"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(empty["message"], json!("No calculations to delete"));
    }

    #[rstest]
    #[case(json!({"expression": "1", "result": "1"}))]
    #[case(json!({"username": "ada", "result": "1"}))]
    #[case(json!({"username": "ada", "expression": "1+1-2", "result": 0}))]
    #[case(json!({"username": "", "expression": "1", "result": "1"}))]
    #[actix_web::test]
    async fn save_requires_truthy_fields(#[case] body: Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(memory_state("static"))
                .configure(configure),
        )
        .await;
        let (status, payload) = send(&app, save(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            payload,
            json!({"success": false, "message": "Missing required fields"})
        );
    }

    #[actix_web::test]
    async fn unknown_users_are_not_found() {
        let app = actix_test::init_service(
            App::new()
                .app_data(memory_state("static"))
                .configure(configure),
        )
        .await;
        let requests = [
            save(json!({"username": "nobody", "expression": "1", "result": "1"})),
            actix_test::TestRequest::get().uri("/api/calculations/nobody"),
            actix_test::TestRequest::delete().uri("/api/calculations/nobody/1"),
            actix_test::TestRequest::delete().uri("/api/calculations/nobody/clear-all"),
        ];
        for request in requests {
            let (status, payload) = send(&app, request).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(payload["message"], json!("User not found"));
        }
    }

    #[rstest]
    #[case("/api/calculations/ada/999")]
    #[case("/api/calculations/ada/99999999999999999999999")]
    #[actix_web::test]
    async fn missing_calculations_are_not_found(#[case] uri: &str) {
        let app = actix_test::init_service(
            App::new()
                .app_data(memory_state("static"))
                .configure(configure),
        )
        .await;
        login(&app, "ada").await;
        let (status, payload) = send(&app, actix_test::TestRequest::delete().uri(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload["message"], json!("Calculation not found"));
    }

    #[actix_web::test]
    async fn deletes_are_scoped_to_owner() {
        let app = actix_test::init_service(
            App::new()
                .app_data(memory_state("static"))
                .configure(configure),
        )
        .await;
        login(&app, "ada").await;
        login(&app, "grace").await;
        let (_, saved) = send(
            &app,
            save(json!({"username": "ada", "expression": "1+1", "result": "2"})),
        )
        .await;
        let id = saved["calculation"]["id"].as_i64().expect("id");

        let (status, _) = send(
            &app,
            actix_test::TestRequest::delete().uri(&format!("/api/calculations/grace/{id}")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, listed) = send(
            &app,
            actix_test::TestRequest::get().uri("/api/calculations/ada"),
        )
        .await;
        assert_eq!(listed["total"], json!(1));
    }

    #[actix_web::test]
    async fn history_failures_surface_as_internal_errors() {
        let mut history = MockCalculationHistory::new();
        history
            .expect_list()
            .times(1)
            .return_once(|_| Err(Error::internal("Error: database error")));

        let fallback = memory_state("static");
        let ports = HttpStatePorts {
            calculator: fallback.calculator.clone(),
            login: fallback.login.clone(),
            history: Arc::new(history),
        };
        let state = web::Data::new(HttpState::new(ports, "static"));
        let app =
            actix_test::init_service(App::new().app_data(state).configure(configure)).await;
        let (status, payload) = send(
            &app,
            actix_test::TestRequest::get().uri("/api/calculations/ada"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            payload,
            json!({"success": false, "message": "Error: database error"})
        );
    }
}
