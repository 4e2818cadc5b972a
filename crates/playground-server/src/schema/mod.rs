//! API schema types for request/response definitions.
//!
//! Types use serde derives for JSON serialization/deserialization. The
//! document body itself is [`playground_core::EditorDocument`].

pub mod common;
pub mod save;
