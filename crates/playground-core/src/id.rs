//! The opaque identifier naming one persisted document.
//!
//! An [`Identifier`] is used verbatim as a file stem on disk, so every value
//! of this type has passed [`Identifier::parse`]. Deserialization goes through
//! the same check.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Longest identifier accepted, in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// A validated, URL-safe token naming a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validates `raw` and wraps it.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        validate(raw)?;
        Ok(Identifier(raw.to_string()))
    }

    /// Mints a fresh random identifier (UUID v4, hyphenated lowercase).
    pub fn generate() -> Self {
        Identifier(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file name this identifier is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

/// Checks the path-safety rules without allocating.
///
/// Rejects empty or over-long input, anything starting with `.`, path
/// separators, NUL, and characters outside `A-Z a-z 0-9 - _ . ~`.
pub fn validate(raw: &str) -> Result<(), CoreError> {
    let invalid = |reason| Err(CoreError::InvalidIdentifier { reason });

    if raw.is_empty() {
        return invalid("empty");
    }
    if raw.len() > MAX_IDENTIFIER_LEN {
        return invalid("too long");
    }
    if raw.starts_with('.') {
        return invalid("leading dot");
    }
    if raw.contains(['/', '\\', '\0']) {
        return invalid("path separator");
    }
    if !raw
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'))
    {
        return invalid("disallowed character");
    }
    Ok(())
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = CoreError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        validate(&raw)?;
        Ok(Identifier(raw))
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}
