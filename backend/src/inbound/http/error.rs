//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the `{success:false, message}`
//! envelope and a matching status code.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Failure envelope returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable failure description.
    #[schema(example = "User not found")]
    pub message: String,
}

impl ErrorResponse {
    /// Build a failure envelope.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        if self.code() == ErrorCode::InternalError {
            error!(trace_id = trace_id.as_deref(), message = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.message()))
    }
}

/// Render JSON extractor failures in the standard envelope.
///
/// Registered through [`actix_web::web::JsonConfig::error_handler`].
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected JSON payload");
    Error::invalid_request(format!("Invalid JSON payload: {err}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("Save error: boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), status);
    }

    #[actix_web::test]
    async fn renders_failure_envelope() {
        let response = ResponseError::error_response(&Error::not_found("User not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: ErrorResponse = serde_json::from_slice(&body).expect("envelope");
        assert_eq!(payload, ErrorResponse::new("User not found"));
    }

    #[actix_web::test]
    async fn internal_messages_are_passed_through() {
        let response =
            ResponseError::error_response(&Error::internal("Clear error: database error"));
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: ErrorResponse = serde_json::from_slice(&body).expect("envelope");
        assert_eq!(payload.message, "Clear error: database error");
        assert!(!payload.success);
    }

    #[actix_web::test]
    async fn json_errors_become_bad_requests() {
        let req = TestRequest::default().to_http_request();
        let err = json_error_handler(JsonPayloadError::ContentType, &req);
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: ErrorResponse = serde_json::from_slice(&body).expect("envelope");
        assert!(payload.message.starts_with("Invalid JSON payload: "));
    }
}
