//! Client error types.

use playground_core::CoreError;
use thiserror::Error;

/// Errors surfaced by [`PlaygroundSession`](crate::PlaygroundSession) and
/// backends.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Loading a stored document failed. Fatal to page initialization.
    #[error("Could not find valid data from {id:?}")]
    InvalidData { id: String },

    /// A mutation was given a malformed file or link.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("link not found: {0}")]
    LinkNotFound(String),

    /// The server answered a save with an error code.
    #[error("save rejected: {0}")]
    SaveRejected(String),

    /// The server's save response did not carry a usable identifier.
    #[error("{0} is not a valid id")]
    InvalidSavedId(String),

    /// A request returned a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("bad base url: {0}")]
    Url(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
