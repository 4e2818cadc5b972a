//! Option shape accepted by the embedded editor widget.
//!
//! The widget renders a [`WidgetOptions`] value, reports edits back in the
//! same shape, and accepts a full replacement at any time. Links are shown
//! to the widget as script records pointing at a CDN; the document only keeps
//! the bare specifier.

use serde::{Deserialize, Serialize};

use crate::document::{EditorDocument, EditorFile};

/// CDN prefix every link specifier is resolved against.
pub const LINK_CDN: &str = "https://unpkg.com/";

/// Widget colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Material,
    None,
    Default,
}

/// A link as the widget displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLink {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl WidgetLink {
    /// Decorates a bare specifier as a CDN-hosted script.
    pub fn script(name: &str) -> Self {
        WidgetLink {
            name: name.to_string(),
            kind: "script".to_string(),
            url: format!("{LINK_CDN}{name}"),
        }
    }
}

/// Full option set for one widget render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    pub files: Vec<EditorFile>,
    pub links: Vec<WidgetLink>,
    /// Name of the initially focused file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub file_tabs: bool,
    #[serde(default)]
    pub link_tabs: bool,
    #[serde(default)]
    pub reload_button: bool,
    #[serde(default)]
    pub console: bool,
    #[serde(default)]
    pub share_button: bool,
}

impl WidgetOptions {
    /// Presents `doc` to the widget.
    ///
    /// The first `.js` file is focused; every link becomes a script record.
    pub fn from_document(doc: &EditorDocument) -> Self {
        WidgetOptions {
            files: doc.files.clone(),
            links: doc.links.iter().map(|l| WidgetLink::script(l)).collect(),
            selected: doc
                .files
                .iter()
                .find(|f| f.name.ends_with(".js"))
                .map(|f| f.name.clone()),
            theme: Theme::Material,
            file_tabs: true,
            link_tabs: true,
            reload_button: true,
            console: true,
            share_button: false,
        }
    }

    /// Recovers the document, dropping the link decoration.
    pub fn to_document(&self) -> EditorDocument {
        EditorDocument {
            files: self.files.clone(),
            links: self.links.iter().map(|l| l.name.clone()).collect(),
        }
    }
}
