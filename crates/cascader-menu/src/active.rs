#![forbid(unsafe_code)]

//! The active (hovered / keyboard-focused) path.

use crate::key::{Key, ValuePath};

/// Holds the active path through the option tree.
///
/// Writes replace the whole path. Nothing here checks that the path still
/// resolves; column derivation degrades to fewer columns when it does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveState {
    path: ValuePath,
}

impl ActiveState {
    /// Create an empty active state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active path.
    #[must_use]
    pub fn path(&self) -> &[Key] {
        &self.path
    }

    /// Replace the active path.
    pub fn set(&mut self, path: ValuePath) {
        self.path = path;
    }

    /// Clear the active path.
    pub fn clear(&mut self) {
        self.path.clear();
    }

    /// Number of active segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Whether nothing is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The active value in column `index`, if any.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<&Key> {
        self.path.get(index)
    }

    /// The first `len` active segments (clamped).
    #[must_use]
    pub fn prefix(&self, len: usize) -> &[Key] {
        &self.path[..len.min(self.path.len())]
    }
}
