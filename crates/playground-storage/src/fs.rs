//! Filesystem implementation of [`DocumentStore`].
//!
//! [`FsStore`] keeps one JSON file per identifier, named `<id>.json`, flat in
//! a single root directory. Every path goes through [`FsStore::record_path`],
//! which re-validates the identifier and checks the result stays directly
//! inside the root.
//!
//! Writes go to a staging file in the root that is then renamed onto the
//! record, so a record is either its previous content or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use playground_core::id::validate;
use playground_core::{EditorDocument, Identifier};
use tempfile::NamedTempFile;

use crate::encode::{decode_document, encode_document};
use crate::error::StorageError;
use crate::traits::DocumentStore;

/// Flat-directory document store.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        Ok(FsStore {
            root: root.canonicalize()?,
        })
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `id` to its record path.
    pub fn record_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        validate(id)?;
        let path = self.root.join(format!("{id}.json"));
        if path.parent() != Some(self.root.as_path()) {
            return Err(playground_core::CoreError::InvalidIdentifier {
                reason: "escapes store root",
            }
            .into());
        }
        Ok(path)
    }

    /// Writes `bytes` to a dot-prefixed staging file in the root.
    ///
    /// The staging name can never be a record name, since identifiers do
    /// not start with `.`. Dropping the handle without persisting removes
    /// the file, so a failed write leaves the root as it was.
    fn stage(&self, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix(".staging-")
            .suffix(".json")
            .tempfile_in(&self.root)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        Ok(file)
    }

    /// Persists `bytes` as a new record under `id`, failing with
    /// [`StorageError::Collision`] if the record already exists.
    fn claim(&self, id: &Identifier, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.record_path(id.as_str())?;
        let staged = self.stage(bytes)?;
        staged
            .persist_noclobber(&path)
            .map_err(|err| match err.error.kind() {
                ErrorKind::AlreadyExists => StorageError::Collision(id.to_string()),
                _ => err.error.into(),
            })?;
        Ok(())
    }
}

impl DocumentStore for FsStore {
    fn exists(&self, id: &str) -> Result<bool, StorageError> {
        let path = self.record_path(id)?;
        Ok(path.try_exists()?)
    }

    fn read(&self, id: &str) -> Result<EditorDocument, StorageError> {
        let path = self.record_path(id)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(id.to_string()))
            }
            Err(err) => return Err(err.into()),
        };
        decode_document(&Identifier::parse(id)?, &bytes)
    }

    fn write(&self, id: &str, doc: &EditorDocument) -> Result<(), StorageError> {
        let path = self.record_path(id)?;
        let bytes = encode_document(doc)?;
        self.stage(&bytes)?.persist(&path).map_err(|err| err.error)?;
        Ok(())
    }

    fn create(&self, doc: &EditorDocument) -> Result<Identifier, StorageError> {
        let id = Identifier::generate();
        let bytes = encode_document(doc)?;
        self.claim(&id, &bytes)?;
        Ok(id)
    }

    fn update(&self, id: &str, doc: &EditorDocument) -> Result<(), StorageError> {
        let path = self.record_path(id)?;
        let bytes = encode_document(doc)?;
        // Records are never deleted, so existence cannot change between
        // this check and the rename.
        if !path.try_exists()? {
            return Err(StorageError::NotFound(id.to_string()));
        }
        self.stage(&bytes)?.persist(&path).map_err(|err| err.error)?;
        Ok(())
    }
}
