//! In-memory implementation of [`DocumentStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral
//! servers. It stores the encoded text of each record, so it shares the
//! filesystem backend's encoding and corruption semantics.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use playground_core::{EditorDocument, Identifier};

use crate::encode::{decode_document, encode_document};
use crate::error::StorageError;
use crate::traits::DocumentStore;

/// Map-backed document store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<Identifier, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes under `id` without encoding, e.g. to simulate a
    /// damaged record.
    pub fn insert_raw(&self, id: &str, bytes: impl Into<Vec<u8>>) -> Result<(), StorageError> {
        let id = Identifier::parse(id)?;
        self.records().insert(id, bytes.into());
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn records(&self) -> MutexGuard<'_, HashMap<Identifier, Vec<u8>>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn key(id: &str) -> Result<Identifier, StorageError> {
        Ok(Identifier::parse(id)?)
    }
}

impl DocumentStore for InMemoryStore {
    fn exists(&self, id: &str) -> Result<bool, StorageError> {
        let key = Self::key(id)?;
        Ok(self.records().contains_key(&key))
    }

    fn read(&self, id: &str) -> Result<EditorDocument, StorageError> {
        let key = Self::key(id)?;
        let records = self.records();
        let bytes = records
            .get(&key)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        decode_document(&key, bytes)
    }

    fn write(&self, id: &str, doc: &EditorDocument) -> Result<(), StorageError> {
        let key = Self::key(id)?;
        let bytes = encode_document(doc)?;
        self.records().insert(key, bytes);
        Ok(())
    }

    fn create(&self, doc: &EditorDocument) -> Result<Identifier, StorageError> {
        let id = Identifier::generate();
        let bytes = encode_document(doc)?;
        let mut records = self.records();
        if records.contains_key(&id) {
            return Err(StorageError::Collision(id.to_string()));
        }
        records.insert(id.clone(), bytes);
        Ok(id)
    }

    fn update(&self, id: &str, doc: &EditorDocument) -> Result<(), StorageError> {
        let key = Self::key(id)?;
        let bytes = encode_document(doc)?;
        match self.records().get_mut(&key) {
            Some(slot) => {
                *slot = bytes;
                Ok(())
            }
            None => Err(StorageError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::EditorFile;

    fn doc(content: &str) -> EditorDocument {
        EditorDocument::new(vec![EditorFile::new("app.js", content)], vec![])
    }

    #[test]
    fn create_read_update_cycle() {
        let store = InMemoryStore::new();
        let id = store.create(&doc("x")).unwrap();
        assert_eq!(store.read(id.as_str()).unwrap(), doc("x"));

        store.update(id.as_str(), &doc("y")).unwrap();
        assert_eq!(store.read(id.as_str()).unwrap(), doc("y"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_missing_creates_nothing() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.update("missing", &doc("x")),
            Err(StorageError::NotFound(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn raw_garbage_reads_as_corrupt() {
        let store = InMemoryStore::new();
        store.insert_raw("broken", "[1,2,3]").unwrap();
        assert!(matches!(store.read("broken"), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn rejects_traversal() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.write("../x", &doc("x")),
            Err(StorageError::InvalidIdentifier(_))
        ));
        assert!(matches!(store.read("a/b"), Err(StorageError::InvalidIdentifier(_))));
        assert!(store.is_empty());
    }
}
