//! Expression evaluation endpoint.
//!
//! ```text
//! POST /api/calculate {"expression":"2+2","calculation_type":"basic"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::expression::Number;
use crate::domain::ports::{CalculateRequest, CalculateResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/calculate`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CalculateRequestBody {
    #[serde(default)]
    #[schema(example = "2+2")]
    pub expression: Option<String>,
    #[serde(default)]
    #[schema(example = "basic")]
    pub calculation_type: Option<String>,
}

impl From<CalculateRequestBody> for CalculateRequest {
    fn from(value: CalculateRequestBody) -> Self {
        Self {
            expression: value.expression.unwrap_or_default(),
            calculation_type: value.calculation_type,
        }
    }
}

/// Successful evaluation envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateResponseBody {
    pub success: bool,
    #[schema(value_type = f64, example = 4)]
    pub result: Number,
    pub expression: String,
    pub calculation_type: String,
}

impl From<CalculateResponse> for CalculateResponseBody {
    fn from(value: CalculateResponse) -> Self {
        Self {
            success: true,
            result: value.result,
            expression: value.expression,
            calculation_type: value.calculation_type,
        }
    }
}

/// Evaluate an arithmetic expression.
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequestBody,
    responses(
        (status = 200, description = "Evaluated result", body = CalculateResponseBody),
        (status = 400, description = "Empty or invalid expression", body = ErrorResponse)
    ),
    tags = ["calculator"],
    operation_id = "calculate"
)]
#[post("/api/calculate")]
pub async fn calculate(
    state: web::Data<HttpState>,
    payload: web::Json<CalculateRequestBody>,
) -> ApiResult<web::Json<CalculateResponseBody>> {
    let request = CalculateRequest::from(payload.into_inner());
    let response = state.calculator.calculate(&request)?;
    Ok(web::Json(response.into()))
}
