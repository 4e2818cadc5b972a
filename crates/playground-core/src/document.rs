//! The persisted editor document: ordered files plus external link names.
//!
//! [`EditorDocument`] is the only entity the store persists. File order is
//! significant (it is the widget's tab order), as is link order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// A serializable stand-in for a compiler function held by the host page.
///
/// The widget resolves `function` against functions the host registered
/// under that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRef {
    pub function: String,
}

/// How the widget compiles a file before running it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Compiler {
    /// One of the widget's built-in compilers, by name (e.g. `"ts"`).
    Named(String),
    /// A host-provided compiler function.
    Function(FunctionRef),
}

/// One editable file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorFile {
    /// File name, including extension. Identifies the file within a document.
    pub name: String,
    /// Full text content.
    pub content: String,
    /// Opaque cursor/selection encoding owned by the widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selections: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<Compiler>,
    /// Widget-private document state. Never transmitted on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
}

impl EditorFile {
    /// Creates a file with only a name and content.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        EditorFile {
            name: name.into(),
            content: content.into(),
            selections: None,
            compiler: None,
            doc: None,
        }
    }

    /// Builds a file from loosely typed input, checking every field's shape.
    ///
    /// Absent and `null` optional fields are treated the same. Unknown fields
    /// are ignored.
    pub fn from_untyped(value: &Value) -> Result<Self, CoreError> {
        let obj = value.as_object().ok_or(CoreError::InvalidFile)?;
        let field_err = |message| CoreError::InvalidFileField { message };

        let name = match obj.get("name") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(field_err("File name must be a string")),
        };
        let content = match obj.get("content") {
            Some(Value::String(s)) => s.clone(),
            _ => return Err(field_err("File content must be a string")),
        };
        let selections = match obj.get("selections") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(field_err("File selections must be a string")),
        };
        let compiler = match obj.get("compiler") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                serde_json::from_value::<Compiler>(raw.clone())
                    .map_err(|_| field_err("File compiler must be a string or a function"))?,
            ),
        };
        let doc = obj.get("doc").filter(|v| !v.is_null()).cloned();

        Ok(EditorFile {
            name,
            content,
            selections,
            compiler,
            doc,
        })
    }

    /// The subset of this file sent to the store: name, content, selections.
    pub fn to_transmitted(&self) -> Self {
        EditorFile {
            name: self.name.clone(),
            content: self.content.clone(),
            selections: self.selections.clone(),
            compiler: None,
            doc: None,
        }
    }
}

/// The full saved/loaded unit of editor state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorDocument {
    pub files: Vec<EditorFile>,
    /// Package/module specifiers, resolved against a CDN by the widget.
    pub links: Vec<String>,
}

impl EditorDocument {
    pub fn new(files: Vec<EditorFile>, links: Vec<String>) -> Self {
        EditorDocument { files, links }
    }

    /// Position of the first file named `name`.
    pub fn file_index(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|f| f.name == name)
    }

    /// Position of the first link equal to `name`.
    pub fn link_index(&self, name: &str) -> Option<usize> {
        self.links.iter().position(|l| l == name)
    }

    /// Copy with `compiler` and `doc` stripped from every file.
    pub fn to_transmitted(&self) -> Self {
        EditorDocument {
            files: self.files.iter().map(EditorFile::to_transmitted).collect(),
            links: self.links.clone(),
        }
    }
}

/// The boilerplate shown when no stored document is requested.
pub fn default_document() -> EditorDocument {
    EditorDocument {
        files: vec![
            EditorFile::new(
                "app.html",
                "<h3>No need to write &lt;body&gt; &lt;/body&gt;</h3>",
            ),
            EditorFile::new(
                "app.css",
                "body {\n\tpadding: 0;\n}\nbody.red {\n\tbackground: rgba(200,0,0,0.2);\n}",
            ),
            EditorFile::new("app.js", "console.dir(location.href);"),
        ],
        links: Vec::new(),
    }
}
