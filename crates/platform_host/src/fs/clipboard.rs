//! Copy/cut selection held between a clipboard action and the next paste.

use serde::{Deserialize, Serialize};

use super::path::normalize_virtual_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Pending clipboard operation.
pub enum ClipboardOperation {
    /// Nothing to paste.
    #[default]
    None,
    /// Paste duplicates the sources.
    Copy,
    /// Paste moves the sources.
    Cut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Source paths plus the operation a paste should apply to them.
pub struct ClipboardState {
    /// Normalized source paths in selection order.
    pub items: Vec<String>,
    /// Operation tag.
    pub operation: ClipboardOperation,
}

impl ClipboardState {
    /// Builds a copy selection.
    pub fn copy<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_operation(paths, ClipboardOperation::Copy)
    }

    /// Builds a cut selection.
    pub fn cut<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_operation(paths, ClipboardOperation::Cut)
    }

    fn with_operation<I, S>(paths: I, operation: ClipboardOperation) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: Vec<String> = Vec::new();
        for path in paths {
            let path = normalize_virtual_path(path.as_ref());
            if path != "/" && !items.contains(&path) {
                items.push(path);
            }
        }
        if items.is_empty() {
            return Self::default();
        }
        Self { items, operation }
    }

    /// Returns `true` when a paste would do nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() || self.operation == ClipboardOperation::None
    }

    /// Returns `true` when `path` is part of a pending cut (used to dim icons).
    pub fn is_cut(&self, path: &str) -> bool {
        self.operation == ClipboardOperation::Cut && self.items.iter().any(|item| item == path)
    }

    /// Returns the clipboard state that should remain after a successful paste.
    ///
    /// A copy selection can be pasted again; a cut selection is consumed.
    pub fn after_paste(self) -> Self {
        match self.operation {
            ClipboardOperation::Cut => Self::default(),
            ClipboardOperation::Copy | ClipboardOperation::None => self,
        }
    }
}
