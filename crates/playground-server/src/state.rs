//! Application state shared by all handlers.
//!
//! [`AppState`] holds the document store behind an `Arc<dyn DocumentStore>`.
//! Store calls are short, synchronous, local operations, so handlers invoke
//! them directly. No lock is taken around them: concurrent saves to the same
//! identifier race and the last write wins.

use std::sync::Arc;

use playground_storage::{DocumentStore, FsStore, InMemoryStore, StorageError};

use crate::config::ServerConfig;
use crate::cookie::CookieGate;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Where documents are persisted.
    pub store: Arc<dyn DocumentStore>,
    /// Required cookie for saves, if any.
    pub cookie_gate: Option<Arc<CookieGate>>,
}

impl AppState {
    /// Creates state backed by a filesystem store at `config.data_dir`.
    pub fn new(config: &ServerConfig) -> Result<Self, StorageError> {
        let store = FsStore::open(&config.data_dir)?;
        tracing::info!(root = %store.root().display(), "document store opened");
        let state = AppState::with_store(Arc::new(store));
        Ok(match &config.cookie_gate {
            Some(gate) => state.with_cookie_gate(gate.clone()),
            None => state,
        })
    }

    /// Creates state with an in-memory store and no cookie gate (for testing).
    pub fn in_memory() -> Self {
        AppState::with_store(Arc::new(InMemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        AppState {
            store,
            cookie_gate: None,
        }
    }

    pub fn with_cookie_gate(mut self, gate: CookieGate) -> Self {
        self.cookie_gate = Some(Arc::new(gate));
        self
    }
}
