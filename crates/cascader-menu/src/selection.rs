#![forbid(unsafe_code)]

//! Selection policy and the open/select integration points.
//!
//! Pointer and keyboard input both end up here, so selectability and the
//! auto-close rule are evaluated the same way for either modality.

use cascader_core::debug;

use crate::active::ActiveState;
use crate::config::CascaderConfig;
use crate::field_names::FieldNames;
use crate::key::Key;
use crate::loading::LoadingTracker;
use crate::path::{ResolveMode, is_leaf, resolve_target, to_path_key};

/// Callbacks into the host input that owns the selection and the dropdown.
pub trait SelectionHost {
    /// A path was committed. The host merges it into its own selection
    /// (replace for single-select, toggle for multi-select).
    fn on_select(&mut self, path: &[Key]);

    /// Show or hide the dropdown.
    fn toggle_open(&mut self, open: bool);
}

impl<H: SelectionHost + ?Sized> SelectionHost for &mut H {
    fn on_select(&mut self, path: &[Key]) {
        (**self).on_select(path);
    }

    fn toggle_open(&mut self, open: bool) {
        (**self).toggle_open(open);
    }
}

/// Applies the selection policies of a [`CascaderConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SelectionCoordinator<'c> {
    config: &'c CascaderConfig,
}

impl<'c> SelectionCoordinator<'c> {
    /// Coordinator over the policies in `config`.
    #[must_use]
    pub fn new(config: &'c CascaderConfig) -> Self {
        Self { config }
    }

    /// Whether `option` may be committed.
    ///
    /// Disabled options never are. Otherwise leaves always are, and every
    /// level is when `change_on_select` or multi-select is on.
    #[must_use]
    pub fn is_selectable<T>(&self, option: &T, fields: &FieldNames<T>) -> bool {
        if fields.is_disabled(option) {
            return false;
        }
        is_leaf(option, fields) || self.config.change_on_select || self.config.multiple
    }

    /// Whether committing a path closes the dropdown.
    ///
    /// Multi-select never closes. Single-select closes on a leaf, or with
    /// `change_on_select` when the commit came from hover mode or the
    /// keyboard.
    #[must_use]
    pub fn should_close(&self, is_leaf_selection: bool, from_keyboard: bool) -> bool {
        !self.config.multiple
            && (is_leaf_selection
                || (self.config.change_on_select
                    && (self.config.hover_trigger() || from_keyboard)))
    }

    /// Emit `path` to the host and close the dropdown when the policy says so.
    ///
    /// Returns whether the dropdown was closed.
    pub fn on_path_select(
        &self,
        path: &[Key],
        is_leaf_selection: bool,
        from_keyboard: bool,
        host: &mut impl SelectionHost,
    ) -> bool {
        host.on_select(path);
        let close = self.should_close(is_leaf_selection, from_keyboard);
        if close {
            debug!(path_key = to_path_key(path).as_str(), "dropdown closed after select");
            host.toggle_open(false);
        }
        close
    }

    /// Commit from the keyboard: `on_path_select` with `from_keyboard` set,
    /// but only when `option` is selectable. Returns whether it committed.
    pub fn on_keyboard_select<T>(
        &self,
        path: &[Key],
        option: &T,
        fields: &FieldNames<T>,
        host: &mut impl SelectionHost,
    ) -> bool {
        if !self.is_selectable(option, fields) {
            return false;
        }
        self.on_path_select(path, is_leaf(option, fields), true, host);
        true
    }

    /// Make `path` active, then request a lazy load for it if one is due.
    ///
    /// Every column-opening interaction goes through here so the active path
    /// and the loading set stay in step. Returns whether a load fired.
    pub fn on_path_open<T>(
        &self,
        path: &[Key],
        active: &mut ActiveState,
        loading: &mut LoadingTracker<T>,
        roots: &[T],
        fields: &FieldNames<T>,
        search_active: bool,
    ) -> bool {
        active.set(path.to_vec());
        loading.load_if_needed(path, roots, fields, search_active)
    }
}

/// The path and option a commit on `option` (found at `path`) stands for.
///
/// A flattened search result carries the full path of the option it stands
/// for; that path is committed instead, together with the original option
/// when it still resolves in `roots`.
pub fn commit_target<'o, T>(
    path: &'o [Key],
    option: &'o T,
    roots: &'o [T],
    fields: &FieldNames<T>,
) -> (&'o [Key], &'o T) {
    match fields.origin_path(option).filter(|origin| !origin.is_empty()) {
        Some(origin) => {
            let original =
                resolve_target(origin, roots, fields, ResolveMode::Exact).unwrap_or(option);
            (origin, original)
        }
        None => (path, option),
    }
}
