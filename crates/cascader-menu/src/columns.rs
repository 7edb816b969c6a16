#![forbid(unsafe_code)]

//! Column derivation.
//!
//! Columns are a pure function of the active path, the option tree and the
//! search flag. They borrow from the tree and are rebuilt from scratch on
//! every call; nothing here is cached or patched.

use cascader_core::debug_span;

use crate::field_names::FieldNames;
use crate::key::Key;

/// One visible level of options.
#[derive(Debug)]
pub struct Column<'a, T> {
    items: Vec<ColumnItem<'a, T>>,
}

impl<T> Clone for Column<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

/// An entry of a [`Column`].
#[derive(Debug)]
pub enum ColumnItem<'a, T> {
    /// A real option from the tree (or the search results).
    Option(&'a T),
    /// The synthetic "nothing here" entry. Always disabled.
    Placeholder(&'a str),
}

impl<T> Clone for ColumnItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ColumnItem<'_, T> {}

impl<'a, T> ColumnItem<'a, T> {
    /// The underlying option, unless this is the placeholder.
    #[must_use]
    pub fn option(&self) -> Option<&'a T> {
        match *self {
            Self::Option(option) => Some(option),
            Self::Placeholder(_) => None,
        }
    }

    /// Whether this is the placeholder entry.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Whether the entry is disabled. The placeholder always is.
    #[must_use]
    pub fn is_disabled(&self, fields: &FieldNames<T>) -> bool {
        match *self {
            Self::Option(option) => fields.is_disabled(option),
            Self::Placeholder(_) => true,
        }
    }
}

impl<'a, T> Column<'a, T> {
    fn from_options(options: &'a [T]) -> Self {
        Self {
            items: options.iter().map(ColumnItem::Option).collect(),
        }
    }

    fn placeholder(label: &'a str) -> Self {
        Self {
            items: vec![ColumnItem::Placeholder(label)],
        }
    }

    /// Entries in display order.
    #[must_use]
    pub fn items(&self) -> &[ColumnItem<'a, T>] {
        &self.items
    }

    /// Real options in display order (the placeholder is skipped).
    pub fn options(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().filter_map(ColumnItem::option)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the column has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this column is the empty-state placeholder column.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.items.iter().any(ColumnItem::is_placeholder)
    }
}

/// Derive the visible columns.
///
/// The first column holds `search` when a search is active, the roots
/// otherwise. Each active segment that matches an option with a non-empty
/// children list adds that list as the next column; the walk stops at the
/// first segment that does not match or whose option has nothing to expand.
///
/// The result always holds at least one column (possibly empty).
pub fn derive_columns<'a, T>(
    active: &[Key],
    roots: &'a [T],
    search: Option<&'a [T]>,
    fields: &FieldNames<T>,
) -> Vec<Column<'a, T>> {
    let _span = debug_span!(
        "cascader_columns",
        depth = active.len(),
        search = search.is_some()
    )
    .entered();

    let first = search.unwrap_or(roots);
    let mut columns = vec![Column::from_options(first)];
    let mut level = first;
    for segment in active {
        let Some(option) = level.iter().find(|o| fields.value(o) == segment) else {
            break;
        };
        match fields.children(option) {
            Some(children) if !children.is_empty() => {
                columns.push(Column::from_options(children));
                level = children;
            }
            _ => break,
        }
    }
    columns
}

/// Apply the empty-state substitution: when the first column is empty, the
/// whole sequence becomes one column holding a disabled placeholder entry
/// labelled `not_found`.
#[must_use]
pub fn with_empty_placeholder<'a, T>(
    columns: Vec<Column<'a, T>>,
    not_found: &'a str,
) -> Vec<Column<'a, T>> {
    if columns.first().is_none_or(Column::is_empty) {
        vec![Column::placeholder(not_found)]
    } else {
        columns
    }
}

/// [`derive_columns`] followed by [`with_empty_placeholder`].
pub fn derive_display_columns<'a, T>(
    active: &[Key],
    roots: &'a [T],
    search: Option<&'a [T]>,
    fields: &FieldNames<T>,
    not_found: &'a str,
) -> Vec<Column<'a, T>> {
    with_empty_placeholder(derive_columns(active, roots, search, fields), not_found)
}
