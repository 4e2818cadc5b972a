//! Client-side state adapter for the code playground.
//!
//! [`PlaygroundSession`] owns the working copy of the editor document and is
//! its only writer. It renders into an embedded [`Widget`], folds the
//! widget's change notifications back into the document, exposes file/link
//! mutations, and loads and saves through a [`Backend`].

pub mod backend;
pub mod error;
pub mod keys;
pub mod session;
pub mod widget;

pub use backend::{Backend, HttpBackend};
pub use error::ClientError;
pub use keys::KeyChord;
pub use session::{PlaygroundSession, SaveOutcome};
pub use widget::Widget;
