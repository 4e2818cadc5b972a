//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. Its
//! `IntoResponse` impl logs the detail server-side and sends only a fixed
//! opaque body, so filesystem state and rejected input never reach the
//! client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use playground_storage::StorageError;

use crate::schema::common::ErrorBody;

/// Body sent for every rejected read or malformed request.
pub const BAD_REQUEST: &str = "Bad Request";

/// Body sent for every failed save.
pub const SAVE_ERROR: &str = "SAVE_ERROR";

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid identifier, missing or corrupt record, or malformed payload (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any failure on the save path (500).
    #[error("save failed: {0}")]
    SaveFailed(String),
}

impl ApiError {
    /// Maps a store failure on the read path. NotFound, Invalid, and Corrupt
    /// are deliberately indistinguishable to the client.
    pub fn read(err: StorageError) -> Self {
        ApiError::BadRequest(err.to_string())
    }

    /// Maps a store failure on the save path.
    pub fn save(err: StorageError) -> Self {
        ApiError::SaveFailed(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(detail) => {
                tracing::warn!(%detail, "request rejected");
                (StatusCode::BAD_REQUEST, BAD_REQUEST)
            }
            ApiError::SaveFailed(detail) => {
                tracing::error!(%detail, "save failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SAVE_ERROR)
            }
        };

        (status, axum::Json(ErrorBody { error: code })).into_response()
    }
}
