//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request and response envelopes they exchange. Domain types stay
//! free of utoipa; only the HTTP DTOs derive `ToSchema`.
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::auth::{LoginRequest, LoginResponse, UserPayload};
use crate::inbound::http::calculate::{CalculateRequestBody, CalculateResponseBody};
use crate::inbound::http::calculations::{
    CalculationPayload, ClearCalculationsResponse, DeleteCalculationResponse,
    ListCalculationsResponse, SaveCalculationBody, SaveCalculationResponse,
    SavedCalculationPayload,
};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::health::HealthStatus;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculator API",
        description = "Expression evaluation with per-user calculation history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::calculate::calculate,
        crate::inbound::http::auth::login,
        crate::inbound::http::calculations::save_calculation,
        crate::inbound::http::calculations::list_calculations,
        crate::inbound::http::calculations::delete_calculation,
        crate::inbound::http::calculations::clear_calculations,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::index::index,
    ),
    components(schemas(
        ErrorResponse,
        CalculateRequestBody,
        CalculateResponseBody,
        LoginRequest,
        LoginResponse,
        UserPayload,
        SaveCalculationBody,
        SaveCalculationResponse,
        SavedCalculationPayload,
        CalculationPayload,
        ListCalculationsResponse,
        DeleteCalculationResponse,
        ClearCalculationsResponse,
        HealthStatus,
    )),
    tags(
        (name = "calculator", description = "Expression evaluation"),
        (name = "auth", description = "Find-or-create login"),
        (name = "calculations", description = "Saved calculation history"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "pages", description = "Static front-end")
    )
)]
pub struct ApiDoc;
