//! HTTP handler modules for the playground API.
//!
//! Handlers parse requests, validate identifiers, delegate to the
//! [`DocumentStore`](playground_storage::DocumentStore), and return JSON.

pub mod documents;
pub mod pages;
