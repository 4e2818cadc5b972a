//! Router assembly for the playground HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with body
//! limit and tracing middleware layers.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::address::request_span;
use crate::handlers;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax; `/data/{file}` expects
/// `<id>.json`. TraceLayer provides request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/healthz", get(handlers::pages::health))
        .route(
            "/data/{file}",
            get(handlers::documents::read_document).post(handlers::documents::read_document),
        )
        .route("/save", post(handlers::documents::save_document))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}
