//! Calculator front-end page.

use std::io::ErrorKind;

use actix_web::{HttpResponse, get, http::header, web};
use tracing::error;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// File served at `/`, relative to the static directory.
pub const INDEX_FILE: &str = "calculator.html";

/// Serve the calculator page.
#[utoipa::path(
    get,
    path = "/",
    tags = ["pages"],
    responses(
        (status = 200, description = "Calculator page", content_type = "text/html"),
        (status = 404, description = "Page not installed", body = ErrorResponse)
    )
)]
#[get("/")]
pub async fn index(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let path = state.static_dir.join(INDEX_FILE);
    let page = tokio::fs::read(&path).await.map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            Error::not_found("Calculator page not found")
        } else {
            error!(path = %path.display(), error = %err, "failed to read calculator page");
            Error::internal("Calculator page could not be read")
        }
    })?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(page))
}
