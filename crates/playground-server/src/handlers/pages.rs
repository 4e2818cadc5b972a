//! Host page and liveness handlers.

use axum::response::Html;
use axum::Json;

use crate::schema::common::HealthResponse;

/// Serves the playground host page.
///
/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// `GET /healthz`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
