//! Storage error types for playground-storage.
//!
//! [`StorageError`] covers every failure mode of the document store. Variants
//! carry enough detail for server-side logs; the HTTP layer decides how much
//! of it a client may see.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The identifier would resolve outside the store root.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] playground_core::CoreError),

    /// No record exists for the identifier.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The record exists but is not a valid editor document.
    #[error("corrupt record {id}: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A freshly generated identifier already names a record.
    #[error("identifier collision: {0}")]
    Collision(String),

    /// No unused identifier was found within the retry budget.
    #[error("no free identifier after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// JSON serialization of a document failed.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Filesystem failure (permissions, disk full, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
