//! Storage for playground editor documents.
//!
//! Provides the [`DocumentStore`] trait defining the storage contract, plus
//! [`FsStore`] (one pretty-printed JSON file per identifier in a flat
//! directory) and [`InMemoryStore`] as interchangeable backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: DocumentStore trait definition
//! - [`encode`]: tab-indented JSON encoding and shape-checked decoding
//! - [`fs`]: FsStore implementation
//! - [`memory`]: InMemoryStore implementation

pub mod encode;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use fs::FsStore;
pub use memory::InMemoryStore;
pub use traits::DocumentStore;
