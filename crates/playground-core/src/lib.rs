//! Core data model for the code playground.
//!
//! Defines the persisted [`EditorDocument`] (ordered files plus external
//! script links), the opaque [`Identifier`] naming a stored document, and the
//! [`WidgetOptions`] shape handed to the embedded editor widget.

pub mod document;
pub mod error;
pub mod id;
pub mod widget;

// Re-export commonly used types
pub use document::{default_document, Compiler, EditorDocument, EditorFile, FunctionRef};
pub use error::CoreError;
pub use id::Identifier;
pub use widget::{Theme, WidgetLink, WidgetOptions};
