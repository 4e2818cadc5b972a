//! Shared response bodies.

use serde::Serialize;

/// Error envelope: `{ "error": "<fixed code>" }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}
