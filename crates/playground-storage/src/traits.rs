//! The [`DocumentStore`] trait defining the storage contract for editor
//! documents.
//!
//! Methods take the identifier as a raw `&str` and validate it themselves,
//! regardless of what the caller already checked. A store is shared across
//! request handlers, so implementations are `Send + Sync` and take `&self`.
//!
//! There is no locking discipline between concurrent writers to the same
//! identifier: the last completed write wins.

use playground_core::{EditorDocument, Identifier};

use crate::error::StorageError;

/// How many identifiers [`DocumentStore::allocate`] tries before giving up.
pub const ALLOCATE_ATTEMPTS: usize = 8;

/// The storage contract for editor documents.
pub trait DocumentStore: Send + Sync {
    /// Generates an identifier that names no existing record.
    ///
    /// The identifier is not claimed: a concurrent `create` may still take
    /// it. Use [`DocumentStore::create`] to mint and persist in one step.
    fn allocate(&self) -> Result<Identifier, StorageError> {
        for _ in 0..ALLOCATE_ATTEMPTS {
            let id = Identifier::generate();
            if !self.exists(id.as_str())? {
                return Ok(id);
            }
        }
        Err(StorageError::AllocationExhausted {
            attempts: ALLOCATE_ATTEMPTS,
        })
    }

    /// Returns whether a record exists for `id`.
    fn exists(&self, id: &str) -> Result<bool, StorageError>;

    /// Reads the document stored under `id`.
    fn read(&self, id: &str) -> Result<EditorDocument, StorageError>;

    /// Writes `doc` under `id`, creating or overwriting the record.
    fn write(&self, id: &str, doc: &EditorDocument) -> Result<(), StorageError>;

    /// Mints a fresh identifier and persists `doc` under it.
    ///
    /// The claim is atomic: if the generated identifier already names a
    /// record this fails with [`StorageError::Collision`] and nothing is
    /// written. There is no retry.
    fn create(&self, doc: &EditorDocument) -> Result<Identifier, StorageError>;

    /// Overwrites the record under `id`, failing with
    /// [`StorageError::NotFound`] if there is none.
    fn update(&self, id: &str, doc: &EditorDocument) -> Result<(), StorageError>;
}
