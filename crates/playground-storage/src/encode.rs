//! On-disk encoding of editor documents.
//!
//! Records are pretty-printed JSON indented with a single tab per level and
//! no trailing newline.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use playground_core::{EditorDocument, Identifier};

use crate::error::StorageError;

/// Serializes `doc` with tab indentation.
pub fn encode_document(doc: &EditorDocument) -> Result<Vec<u8>, StorageError> {
    let mut ser = serde_json::Serializer::with_formatter(Vec::new(), PrettyFormatter::with_indent(b"\t"));
    doc.serialize(&mut ser).map_err(StorageError::Serialization)?;
    Ok(ser.into_inner())
}

/// Parses stored bytes, reporting shape mismatches as [`StorageError::Corrupt`].
pub fn decode_document(id: &Identifier, bytes: &[u8]) -> Result<EditorDocument, StorageError> {
    serde_json::from_slice(bytes).map_err(|source| StorageError::Corrupt {
        id: id.to_string(),
        source,
    })
}
