//! Keyboard shortcut detection.

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    /// The key value, e.g. `"s"`.
    pub key: String,
    pub ctrl: bool,
    /// The Cmd key on macOS.
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        KeyChord {
            key: key.into(),
            ctrl,
            meta,
        }
    }

    /// Ctrl+S or Cmd+S.
    pub fn is_save(&self) -> bool {
        (self.ctrl || self.meta) && self.key == "s"
    }
}
