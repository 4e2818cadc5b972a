//! The session: single owner of the in-browser editor document.
//!
//! Every change to the working copy goes through a `&mut PlaygroundSession`
//! method, so there is exactly one writer. Widget change notifications are
//! delivered the same way and run to completion before the next event.

use serde_json::Value;

use playground_core::{default_document, EditorDocument, EditorFile, Identifier, WidgetOptions};

use crate::backend::Backend;
use crate::error::ClientError;
use crate::keys::KeyChord;
use crate::widget::Widget;

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The server minted a new identifier, which the session adopted. The
    /// host should reflect it in its address bar.
    Created(Identifier),
    /// The existing record was overwritten.
    Updated(Identifier),
}

impl SaveOutcome {
    pub fn id(&self) -> &Identifier {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
        }
    }
}

/// Editor state bound to one widget.
#[derive(Debug)]
pub struct PlaygroundSession<W> {
    document: EditorDocument,
    id: Option<Identifier>,
    widget: W,
}

impl<W: Widget> PlaygroundSession<W> {
    /// Starts a session on `document` and renders it.
    pub fn new(widget: W, document: EditorDocument, id: Option<Identifier>) -> Self {
        let mut session = PlaygroundSession {
            document,
            id,
            widget,
        };
        session.render();
        session
    }

    /// Starts a session from the identifier in the page address, if any.
    ///
    /// Without an identifier the default document is used. With one, any
    /// fetch failure or malformed response is fatal: no partial render
    /// happens. A fetched object missing a `files` or `links` array takes
    /// that field from the default document.
    pub async fn load<B: Backend>(
        widget: W,
        backend: &B,
        id: Option<&str>,
    ) -> Result<Self, ClientError> {
        let Some(raw) = id else {
            return Ok(Self::new(widget, default_document(), None));
        };

        let invalid = || ClientError::InvalidData { id: raw.to_string() };
        let id = Identifier::parse(raw).map_err(|_| invalid())?;
        let data = backend.fetch(&id).await.map_err(|err| {
            tracing::warn!(%id, error = %err, "failed to fetch document");
            invalid()
        })?;
        let document = document_from_fetched(&data).ok_or_else(invalid)?;

        tracing::info!(%id, files = document.files.len(), "document loaded");
        Ok(Self::new(widget, document, Some(id)))
    }

    pub fn document(&self) -> &EditorDocument {
        &self.document
    }

    /// Identifier of the stored record this session saves to.
    pub fn id(&self) -> Option<&Identifier> {
        self.id.as_ref()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Replaces the working copy with the widget's reported state.
    pub fn on_widget_change(&mut self, state: &WidgetOptions) {
        self.document = state.to_document();
    }

    /// Appends `file` after validating its name.
    pub fn add_file(&mut self, file: EditorFile) -> Result<(), ClientError> {
        if file.name.is_empty() {
            return Err(playground_core::CoreError::InvalidFileField {
                message: "File name must be a string",
            }
            .into());
        }
        self.document.files.push(file);
        self.render();
        Ok(())
    }

    /// Appends a file given as loosely typed JSON, checking every field.
    pub fn add_file_untyped(&mut self, file: &Value) -> Result<(), ClientError> {
        let file = EditorFile::from_untyped(file)?;
        self.add_file(file)
    }

    /// Removes the first file called `name`, keeping the others in order.
    pub fn remove_file(&mut self, name: &str) -> Result<EditorFile, ClientError> {
        let index = self
            .document
            .file_index(name)
            .ok_or_else(|| ClientError::FileNotFound(name.to_string()))?;
        let removed = self.document.files.remove(index);
        self.render();
        Ok(removed)
    }

    /// Appends an external script link.
    pub fn add_link(&mut self, name: &str) -> Result<(), ClientError> {
        if name.is_empty() {
            return Err(playground_core::CoreError::InvalidLink.into());
        }
        self.document.links.push(name.to_string());
        self.render();
        Ok(())
    }

    /// Removes the first link equal to `name`.
    pub fn remove_link(&mut self, name: &str) -> Result<(), ClientError> {
        if name.is_empty() {
            return Err(playground_core::CoreError::InvalidLink.into());
        }
        let index = self
            .document
            .link_index(name)
            .ok_or_else(|| ClientError::LinkNotFound(name.to_string()))?;
        self.document.links.remove(index);
        self.render();
        Ok(())
    }

    /// Saves the working copy, without `compiler` and `doc` fields.
    ///
    /// A session without an identifier adopts the one the server mints.
    pub async fn save<B: Backend>(&mut self, backend: &B) -> Result<SaveOutcome, ClientError> {
        let returned = backend.save(self.id.as_ref(), &self.document).await?;
        let returned =
            Identifier::parse(&returned).map_err(|_| ClientError::InvalidSavedId(returned))?;

        match &self.id {
            Some(current) => {
                if *current != returned {
                    tracing::warn!(%current, %returned, "server answered an update with a different id");
                }
                Ok(SaveOutcome::Updated(current.clone()))
            }
            None => {
                tracing::info!(id = %returned, "adopted new document id");
                self.id = Some(returned.clone());
                Ok(SaveOutcome::Created(returned))
            }
        }
    }

    /// Saves on Ctrl+S / Cmd+S; other chords are ignored.
    pub async fn handle_key<B: Backend>(
        &mut self,
        chord: &KeyChord,
        backend: &B,
    ) -> Result<Option<SaveOutcome>, ClientError> {
        if !chord.is_save() {
            return Ok(None);
        }
        self.save(backend).await.map(Some)
    }

    fn render(&mut self) {
        self.widget.set(WidgetOptions::from_document(&self.document));
    }
}

/// Interprets fetched JSON as a document, falling back per field to the
/// default document when `files` or `links` is not an array.
fn document_from_fetched(data: &Value) -> Option<EditorDocument> {
    let obj = data.as_object()?;
    let defaults = default_document();

    let files = match obj.get("files") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).ok())
            .collect::<Option<Vec<EditorFile>>>()?,
        _ => defaults.files,
    };
    let links = match obj.get("links") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()?,
        _ => defaults.links,
    };

    Some(EditorDocument { files, links })
}
