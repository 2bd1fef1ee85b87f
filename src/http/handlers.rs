use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::core::{PingResponse, ValidationRequest, W3cResponse, YangreResponse};
use crate::error::GatewayError;
use crate::http::backend::Backend;

const DOCS_PAGE: &str = include_str!("../../resources/docs.html");
const OPENAPI_DOCUMENT: &str = include_str!("../../resources/openapi.json");

/// `GET /`: API documentation page
pub async fn docs() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

/// `GET /openapi.json`: the document rendered by the docs page
pub async fn openapi() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], OPENAPI_DOCUMENT)
}

/// `GET /ping`: liveness check
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::success())
}

/// `POST /w3c`
pub async fn w3c(
    State(backend): State<Backend>,
    body: Bytes,
) -> Result<Json<W3cResponse>, GatewayError> {
    let request = ValidationRequest::from_slice(&body)?;
    let response = backend.gateway.validate_w3c(request).await?;
    Ok(Json(response))
}

/// `POST /yangre`
pub async fn yangre(
    State(backend): State<Backend>,
    body: Bytes,
) -> Result<Json<YangreResponse>, GatewayError> {
    let request = ValidationRequest::from_slice(&body)?;
    let response = backend.gateway.validate_yangre(request).await?;
    Ok(Json(response))
}
