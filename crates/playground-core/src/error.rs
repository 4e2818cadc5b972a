//! Core error types for playground-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Messages are
//! fixed strings: rejected input is never echoed back, so these errors are
//! safe to surface to untrusted callers.

use thiserror::Error;

/// Core errors produced by the playground-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An identifier failed the path-safety or character-set rules.
    #[error("invalid identifier: {reason}")]
    InvalidIdentifier { reason: &'static str },

    /// A file supplied as untyped input was not an object.
    #[error("Invalid file")]
    InvalidFile,

    /// A file field had the wrong type or was empty where a value is required.
    #[error("{message}")]
    InvalidFileField { message: &'static str },

    /// A link name was empty.
    #[error("link name must be a non-empty string")]
    InvalidLink,
}
