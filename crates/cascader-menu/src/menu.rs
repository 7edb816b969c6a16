#![forbid(unsafe_code)]

//! The option-list facade.
//!
//! [`CascaderMenu`] owns the session state (active path, loading keys) and
//! the policies. Everything else arrives per call in a [`MenuContext`]: the
//! host's option tree, search results and current selection are read-only
//! snapshots, and the menu never holds on to them between calls.
//!
//! # Example
//!
//! ```
//! use cascader_menu::{CascaderConfig, CascaderMenu, CascaderOption, FieldNames, MenuContext};
//! use cascader_menu::key::{Key, path};
//! use cascader_menu::selection::SelectionHost;
//!
//! #[derive(Default)]
//! struct Host {
//!     value: Vec<Key>,
//!     open: bool,
//! }
//!
//! impl SelectionHost for Host {
//!     fn on_select(&mut self, path: &[Key]) {
//!         self.value = path.to_vec();
//!     }
//!     fn toggle_open(&mut self, open: bool) {
//!         self.open = open;
//!     }
//! }
//!
//! let tree = vec![CascaderOption::new("a").child(CascaderOption::new("b").with_leaf(true))];
//! let mut menu = CascaderMenu::new(FieldNames::standard(), CascaderConfig::default());
//! let mut host = Host { open: true, ..Host::default() };
//! let ctx = MenuContext::new(&tree);
//!
//! menu.on_path_open(&path(["a"]), &ctx);
//! assert_eq!(menu.view(&ctx).columns().len(), 2);
//!
//! let b = &tree[0].children.as_ref().unwrap()[0];
//! menu.on_option_click(&path(["a", "b"]), b, &ctx, &mut host);
//! assert_eq!(host.value, path(["a", "b"]));
//! assert!(!host.open);
//! ```

use std::borrow::Cow;

use cascader_core::debug;
use cascader_core::event::{Event, KeyEvent};

use crate::active::ActiveState;
use crate::checked::CheckedState;
use crate::columns::{Column, derive_columns, derive_display_columns};
use crate::config::CascaderConfig;
use crate::field_names::FieldNames;
use crate::key::{Key, ValuePath};
use crate::keyboard::{KeyOutcome, KeyboardNavigator, NavigationTarget};
use crate::loading::{LoadDataFn, LoadingTracker};
use crate::path::is_leaf;
use crate::selection::{SelectionCoordinator, SelectionHost, commit_target};

// ============================================================================
// Context
// ============================================================================

/// Read-only host data for one interaction or render.
#[derive(Debug)]
pub struct MenuContext<'a, T> {
    /// The option tree.
    pub options: &'a [T],
    /// Current search text; non-empty means search mode.
    pub search_value: &'a str,
    /// Pre-flattened search results, listed instead of the tree while searching.
    pub search_options: &'a [T],
    /// Selected paths.
    pub values: &'a [ValuePath],
    /// Half-selected paths (multi-select).
    pub half_values: &'a [ValuePath],
}

impl<T> Clone for MenuContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MenuContext<'_, T> {}

impl<'a, T> MenuContext<'a, T> {
    /// Context over `options` with no search and no selection.
    #[must_use]
    pub fn new(options: &'a [T]) -> Self {
        Self {
            options,
            search_value: "",
            search_options: &[],
            values: &[],
            half_values: &[],
        }
    }

    /// Enter search mode with the given text and flattened results.
    #[must_use]
    pub fn with_search(mut self, search_value: &'a str, search_options: &'a [T]) -> Self {
        self.search_value = search_value;
        self.search_options = search_options;
        self
    }

    /// Set the selected paths.
    #[must_use]
    pub fn with_values(mut self, values: &'a [ValuePath]) -> Self {
        self.values = values;
        self
    }

    /// Set the half-selected paths.
    #[must_use]
    pub fn with_half_values(mut self, half_values: &'a [ValuePath]) -> Self {
        self.half_values = half_values;
        self
    }

    /// Whether a search is active.
    #[must_use]
    pub fn search_active(&self) -> bool {
        !self.search_value.is_empty()
    }

    /// The list shown in the first column.
    #[must_use]
    pub fn merged_options(&self) -> &'a [T] {
        if self.search_active() {
            self.search_options
        } else {
            self.options
        }
    }

    fn search(&self) -> Option<&'a [T]> {
        self.search_active().then_some(self.search_options)
    }
}

// ============================================================================
// View
// ============================================================================

/// Render-ready columns.
#[derive(Debug)]
pub struct MenuView<'a, T> {
    columns: Vec<ColumnView<'a, T>>,
    empty: bool,
}

impl<'a, T> MenuView<'a, T> {
    /// Columns left to right.
    #[must_use]
    pub fn columns(&self) -> &[ColumnView<'a, T>] {
        &self.columns
    }

    /// Whether the view is the single not-found placeholder column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.empty
    }
}

/// One column with the props its renderer needs.
#[derive(Debug)]
pub struct ColumnView<'a, T> {
    /// Column position.
    pub index: usize,
    /// Active path leading into this column (`active[..index]`).
    pub prev_path: ValuePath,
    /// Active value in this column, if any.
    pub active_value: Option<Key>,
    /// Whether rows render checkboxes. Off for the placeholder column.
    pub multiple: bool,
    /// Rows in display order.
    pub entries: Vec<ColumnEntry<'a, T>>,
}

/// One row.
#[derive(Debug)]
pub struct ColumnEntry<'a, T> {
    /// The option, or `None` for the placeholder.
    pub option: Option<&'a T>,
    /// Display label.
    pub label: Option<Cow<'a, str>>,
    /// Full path of the row (`prev_path` + value). Empty for the placeholder.
    /// Pass this back to the pointer handlers.
    pub path: ValuePath,
    /// Path a commit on this row emits: the origin path for a search hit,
    /// `path` otherwise.
    pub commit_path: ValuePath,
    /// The row's option is disabled.
    pub disabled: bool,
    /// The committed option is a leaf.
    pub is_leaf: bool,
    /// A click or Enter on this row would commit it.
    pub selectable: bool,
    /// `commit_path` is among the selected values.
    pub checked: bool,
    /// `commit_path` is among the half-selected values.
    pub half_checked: bool,
    /// A lazy load for this row is pending.
    pub loading: bool,
    /// The row is on the active path.
    pub active: bool,
}

impl<T> ColumnEntry<'_, T> {
    /// Whether this is the not-found placeholder row.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.option.is_none()
    }
}

// ============================================================================
// Menu
// ============================================================================

/// Cascading option list state machine.
pub struct CascaderMenu<T> {
    fields: FieldNames<T>,
    config: CascaderConfig,
    active: ActiveState,
    loading: LoadingTracker<T>,
}

impl<T> core::fmt::Debug for CascaderMenu<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CascaderMenu")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl<T> CascaderMenu<T> {
    /// Create a menu without lazy loading.
    #[must_use]
    pub fn new(fields: FieldNames<T>, config: CascaderConfig) -> Self {
        Self {
            fields,
            config,
            active: ActiveState::new(),
            loading: LoadingTracker::new(),
        }
    }

    /// Enable lazy loading. The loader receives the resolved chain of the
    /// opened path and is expected to attach children to the host's tree.
    #[must_use]
    pub fn with_loader(mut self, loader: impl FnMut(&[&T]) + 'static) -> Self {
        self.loading.set_loader(Some(Box::new(loader)));
        self
    }

    /// Install or remove the loader.
    pub fn set_loader(&mut self, loader: Option<LoadDataFn<T>>) {
        self.loading.set_loader(loader);
    }

    /// Selection policies and the not-found label.
    #[must_use]
    pub fn config(&self) -> &CascaderConfig {
        &self.config
    }

    /// Mutable access to the policies.
    pub fn config_mut(&mut self) -> &mut CascaderConfig {
        &mut self.config
    }

    /// Accessors used for every option read.
    #[must_use]
    pub fn fields(&self) -> &FieldNames<T> {
        &self.fields
    }

    /// The active path.
    #[must_use]
    pub fn active_path(&self) -> &[Key] {
        self.active.path()
    }

    /// Replace the active path without triggering a load.
    pub fn set_active(&mut self, path: ValuePath) {
        self.active.set(path);
    }

    /// Lazy-load bookkeeping.
    #[must_use]
    pub fn loading(&self) -> &LoadingTracker<T> {
        &self.loading
    }

    fn coordinator(&self) -> SelectionCoordinator<'_> {
        SelectionCoordinator::new(&self.config)
    }

    /// Forget the session: active path and loading keys.
    pub fn reset(&mut self) {
        self.active.clear();
        self.loading.clear();
    }

    /// Drop loading keys that `ctx.options` shows as settled. Call after
    /// every change to the host's tree. Returns the number of keys dropped.
    pub fn reconcile(&mut self, ctx: &MenuContext<'_, T>) -> usize {
        self.loading.reconcile(ctx.options, &self.fields)
    }

    /// Make `path` active and lazy-load it if due. Returns whether a load
    /// fired.
    pub fn on_path_open(&mut self, path: &[Key], ctx: &MenuContext<'_, T>) -> bool {
        SelectionCoordinator::new(&self.config).on_path_open(
            path,
            &mut self.active,
            &mut self.loading,
            ctx.options,
            &self.fields,
            ctx.search_active(),
        )
    }

    /// Whether `option` may be committed.
    #[must_use]
    pub fn is_selectable(&self, option: &T) -> bool {
        self.coordinator().is_selectable(option, &self.fields)
    }

    /// Emit `path` and close when the policy says so. Returns whether the
    /// dropdown was closed.
    pub fn on_path_select(
        &self,
        path: &[Key],
        is_leaf_selection: bool,
        from_keyboard: bool,
        host: &mut impl SelectionHost,
    ) -> bool {
        self.coordinator()
            .on_path_select(path, is_leaf_selection, from_keyboard, host)
    }

    /// Commit `path` from the keyboard if `option` is selectable.
    pub fn on_keyboard_select(
        &self,
        path: &[Key],
        option: &T,
        host: &mut impl SelectionHost,
    ) -> bool {
        self.coordinator()
            .on_keyboard_select(path, option, &self.fields, host)
    }

    // ------------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------------

    fn open_on_pointer(&mut self, path: &[Key], option: &T, ctx: &MenuContext<'_, T>) {
        if self.fields.is_disabled(option) {
            return;
        }
        if !self.config.hover_trigger() || !is_leaf(option, &self.fields) {
            self.on_path_open(path, ctx);
        }
    }

    fn select_on_pointer(
        &self,
        path: &[Key],
        option: &T,
        ctx: &MenuContext<'_, T>,
        host: &mut impl SelectionHost,
    ) -> bool {
        let (path, option) = commit_target(path, option, ctx.options, &self.fields);
        if !self.is_selectable(option) {
            return false;
        }
        self.on_path_select(path, is_leaf(option, &self.fields), false, host);
        true
    }

    /// A row was clicked. Opens it (unless it is a leaf under the hover
    /// trigger), then commits it in single-select mode or when it is a leaf.
    pub fn on_option_click(
        &mut self,
        path: &[Key],
        option: &T,
        ctx: &MenuContext<'_, T>,
        host: &mut impl SelectionHost,
    ) {
        self.open_on_pointer(path, option, ctx);
        if !self.config.multiple || is_leaf(option, &self.fields) {
            self.select_on_pointer(path, option, ctx, host);
        }
    }

    /// The pointer entered a row. Opens it under the hover trigger.
    pub fn on_option_hover(&mut self, path: &[Key], option: &T, ctx: &MenuContext<'_, T>) {
        if self.config.hover_trigger() {
            self.open_on_pointer(path, option, ctx);
        }
    }

    /// A row was double-clicked. Closes the dropdown with `change_on_select`.
    pub fn on_option_double_click(&self, host: &mut impl SelectionHost) {
        if self.config.change_on_select {
            debug!("dropdown closed on double click");
            host.toggle_open(false);
        }
    }

    /// A row's checkbox was clicked (multi-select). Commits without opening.
    /// Returns whether the path was committed.
    pub fn on_checkbox_click(
        &self,
        path: &[Key],
        option: &T,
        ctx: &MenuContext<'_, T>,
        host: &mut impl SelectionHost,
    ) -> bool {
        self.select_on_pointer(path, option, ctx, host)
    }

    // ------------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------------

    /// Handle a key press.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        ctx: &MenuContext<'_, T>,
        host: &mut impl SelectionHost,
    ) -> KeyOutcome {
        let navigator = KeyboardNavigator::new(
            self.active.path(),
            ctx.merged_options(),
            ctx.options,
            self.fields,
            self.config.direction,
            ctx.search_active(),
        );
        let mut bridge = KeyboardBridge {
            menu: self,
            ctx,
            host,
        };
        navigator.handle_key(key, &mut bridge)
    }

    /// Handle an input event. Losing focus closes the dropdown.
    pub fn handle_event(
        &mut self,
        event: &Event,
        ctx: &MenuContext<'_, T>,
        host: &mut impl SelectionHost,
    ) -> KeyOutcome {
        match event {
            Event::Key(key) => self.handle_key(key, ctx, host),
            Event::Focus(false) => {
                debug!("dropdown closed on focus loss");
                host.toggle_open(false);
                KeyOutcome::Closed
            }
            Event::Focus(true) => KeyOutcome::Ignored,
        }
    }

    // ------------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------------

    /// The visible columns, with the not-found placeholder substituted when
    /// there is nothing to list.
    pub fn columns<'a>(&'a self, ctx: &MenuContext<'a, T>) -> Vec<Column<'a, T>> {
        derive_display_columns(
            self.active.path(),
            ctx.options,
            ctx.search(),
            &self.fields,
            &self.config.not_found_content,
        )
    }

    /// Build the render props for every visible column.
    ///
    /// Loading flags reflect `ctx.options` even when [`reconcile`]
    /// has not run yet.
    ///
    /// [`reconcile`]: Self::reconcile
    pub fn view<'a>(&self, ctx: &MenuContext<'a, T>) -> MenuView<'a, T> {
        let active = self.active.path();
        let columns = derive_columns(active, ctx.options, ctx.search(), &self.fields);
        if columns.first().is_none_or(Column::is_empty) {
            return self.placeholder_view();
        }

        let checked = CheckedState::from_values(ctx.values, ctx.half_values);
        let columns = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let prev_path = self.active.prefix(index).to_vec();
                let active_value = self.active.value_at(index).cloned();
                let entries = column
                    .options()
                    .map(|option| {
                        self.entry(option, &prev_path, active_value.as_ref(), &checked, ctx)
                    })
                    .collect();
                ColumnView {
                    index,
                    prev_path,
                    active_value,
                    multiple: self.config.multiple,
                    entries,
                }
            })
            .collect();
        MenuView {
            columns,
            empty: false,
        }
    }

    fn entry<'a>(
        &self,
        option: &'a T,
        prev_path: &[Key],
        active_value: Option<&Key>,
        checked: &CheckedState,
        ctx: &MenuContext<'a, T>,
    ) -> ColumnEntry<'a, T> {
        let value = self.fields.value(option);
        let mut path = prev_path.to_vec();
        path.push(value.clone());

        // Search hits stand for the option at their origin path.
        let (commit_path, target) = commit_target(&path, option, ctx.options, &self.fields);
        let commit_path = commit_path.to_vec();
        let target_is_leaf = is_leaf(target, &self.fields);
        let selectable = self.is_selectable(target);

        ColumnEntry {
            option: Some(option),
            label: self.fields.label(option).map(Cow::Borrowed),
            disabled: self.fields.is_disabled(option),
            is_leaf: target_is_leaf,
            selectable,
            checked: checked.is_checked(&commit_path),
            half_checked: checked.is_half_checked(&commit_path),
            loading: self.loading.is_pending(&path, ctx.options, &self.fields),
            active: active_value == Some(value),
            path,
            commit_path,
        }
    }

    fn placeholder_view<'a>(&self) -> MenuView<'a, T> {
        let entry = ColumnEntry {
            option: None,
            label: Some(Cow::Owned(self.config.not_found_content.clone())),
            path: Vec::new(),
            commit_path: Vec::new(),
            disabled: true,
            is_leaf: true,
            selectable: false,
            checked: false,
            half_checked: false,
            loading: false,
            active: false,
        };
        MenuView {
            columns: vec![ColumnView {
                index: 0,
                prev_path: Vec::new(),
                active_value: self.active.value_at(0).cloned(),
                multiple: false,
                entries: vec![entry],
            }],
            empty: true,
        }
    }
}

/// Routes keyboard navigation into the menu and the host.
struct KeyboardBridge<'m, 'a, T, H> {
    menu: &'m mut CascaderMenu<T>,
    ctx: &'m MenuContext<'a, T>,
    host: &'m mut H,
}

impl<T, H: SelectionHost> NavigationTarget<T> for KeyboardBridge<'_, '_, T, H> {
    fn on_path_open(&mut self, path: &[Key]) {
        self.menu.on_path_open(path, self.ctx);
    }

    fn on_keyboard_select(&mut self, path: &[Key], option: &T) {
        self.menu.on_keyboard_select(path, option, &mut *self.host);
    }

    fn toggle_open(&mut self, open: bool) {
        if !open {
            debug!("dropdown closed from keyboard");
        }
        self.host.toggle_open(open);
    }
}
