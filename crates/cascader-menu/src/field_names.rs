#![forbid(unsafe_code)]

//! Accessors for reading option nodes.
//!
//! The menu never inspects an option directly. Every read of a value, label,
//! child list or flag goes through a [`FieldNames`] instance, so hosts can
//! plug in their own node types (or remap differently-shaped data) by
//! supplying plain accessor functions.

use core::fmt;

use crate::key::Key;
use crate::option::CascaderOption;

/// Accessor functions for an option node type `T`.
///
/// `value`, `label` and `children` are required. The disabled flag, the
/// explicit leaf flag and the search origin path default to "not set".
pub struct FieldNames<T> {
    value: fn(&T) -> &Key,
    label: fn(&T) -> Option<&str>,
    children: fn(&T) -> Option<&[T]>,
    disabled: fn(&T) -> bool,
    leaf_flag: fn(&T) -> Option<bool>,
    origin_path: fn(&T) -> Option<&[Key]>,
}

fn never_disabled<T>(_: &T) -> bool {
    false
}

fn no_leaf_flag<T>(_: &T) -> Option<bool> {
    None
}

fn no_origin_path<T>(_: &T) -> Option<&[Key]> {
    None
}

impl<T> FieldNames<T> {
    /// Create accessors from the three required extraction functions.
    #[must_use]
    pub fn new(
        value: fn(&T) -> &Key,
        label: fn(&T) -> Option<&str>,
        children: fn(&T) -> Option<&[T]>,
    ) -> Self {
        Self {
            value,
            label,
            children,
            disabled: never_disabled::<T>,
            leaf_flag: no_leaf_flag::<T>,
            origin_path: no_origin_path::<T>,
        }
    }

    /// Set the disabled-flag accessor.
    #[must_use]
    pub fn with_disabled(mut self, disabled: fn(&T) -> bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the explicit leaf-flag accessor.
    #[must_use]
    pub fn with_leaf_flag(mut self, leaf_flag: fn(&T) -> Option<bool>) -> Self {
        self.leaf_flag = leaf_flag;
        self
    }

    /// Set the accessor that maps a flattened search result back to the
    /// full path of the option it stands for.
    #[must_use]
    pub fn with_origin_path(mut self, origin_path: fn(&T) -> Option<&[Key]>) -> Self {
        self.origin_path = origin_path;
        self
    }

    /// The option's value.
    #[inline]
    #[must_use]
    pub fn value<'a>(&self, option: &'a T) -> &'a Key {
        (self.value)(option)
    }

    /// The option's label, if any.
    #[inline]
    #[must_use]
    pub fn label<'a>(&self, option: &'a T) -> Option<&'a str> {
        (self.label)(option)
    }

    /// The option's children. `None` means the field is absent (not loaded
    /// or a leaf); `Some(&[])` means loaded with no children.
    #[inline]
    #[must_use]
    pub fn children<'a>(&self, option: &'a T) -> Option<&'a [T]> {
        (self.children)(option)
    }

    /// Whether the option is disabled.
    #[inline]
    #[must_use]
    pub fn is_disabled(&self, option: &T) -> bool {
        (self.disabled)(option)
    }

    /// The explicit leaf flag, if the option carries one.
    #[inline]
    #[must_use]
    pub fn leaf_flag(&self, option: &T) -> Option<bool> {
        (self.leaf_flag)(option)
    }

    /// Full path of the original option behind a flattened search result.
    #[inline]
    #[must_use]
    pub fn origin_path<'a>(&self, option: &'a T) -> Option<&'a [Key]> {
        (self.origin_path)(option)
    }
}

impl<T> Clone for FieldNames<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldNames<T> {}

impl<T> fmt::Debug for FieldNames<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldNames").finish_non_exhaustive()
    }
}

impl FieldNames<CascaderOption> {
    /// Accessors for the built-in [`CascaderOption`] node.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            |o| &o.value,
            |o| o.label.as_deref(),
            |o| o.children.as_deref(),
        )
        .with_disabled(|o| o.disabled)
        .with_leaf_flag(|o| o.is_leaf)
        .with_origin_path(|o| o.origin_path.as_deref())
    }
}

impl Default for FieldNames<CascaderOption> {
    fn default() -> Self {
        Self::standard()
    }
}
