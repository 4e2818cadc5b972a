//! HTTP/JSON API server for the code playground.
//!
//! Serves the host page, returns stored editor documents by identifier, and
//! saves documents under a freshly minted or existing identifier. This crate
//! contains the router, handlers, wire schema, error mapping, environment
//! configuration, and the optional cookie gate on saves.

pub mod address;
pub mod config;
pub mod cookie;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
