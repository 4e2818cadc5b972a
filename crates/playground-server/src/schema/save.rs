//! Save request/response types.

use playground_core::Identifier;
use serde::{Deserialize, Serialize};

/// Query string of `POST /save`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveQuery {
    /// Identifier of the record to overwrite. Absent or empty mints a new one.
    #[serde(default)]
    pub id: Option<String>,
}

impl SaveQuery {
    /// The requested identifier, treating an empty value as absent.
    pub fn target(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Successful save: `{ "error": false, "data": { "id": "..." } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Always `false`.
    pub error: bool,
    pub data: SavedRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecord {
    pub id: Identifier,
}

impl SaveResponse {
    pub fn ok(id: Identifier) -> Self {
        SaveResponse {
            error: false,
            data: SavedRecord { id },
        }
    }
}
