#![forbid(unsafe_code)]

//! Built-in option node.
//!
//! Hosts with their own node type can ignore this module entirely and
//! describe their type through [`FieldNames`](crate::field_names::FieldNames).
//!
//! # Example
//!
//! ```
//! use cascader_menu::option::CascaderOption;
//!
//! let tree = vec![
//!     CascaderOption::new("zhejiang")
//!         .with_label("Zhejiang")
//!         .child(CascaderOption::new("hangzhou").with_leaf(true)),
//!     CascaderOption::new("jiangsu").with_leaf(false),
//! ];
//!
//! assert_eq!(tree[0].children.as_ref().map(Vec::len), Some(1));
//! assert!(tree[1].children.is_none());
//! ```

use crate::key::{Key, ValuePath};

/// A node in the option tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CascaderOption {
    /// Identifying value, unique among siblings.
    pub value: Key,
    /// Display label.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
    /// Child options. `None` = not loaded (or a leaf), `Some(vec![])` = loaded, empty.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub children: Option<Vec<CascaderOption>>,
    /// Disabled options can be neither opened nor selected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled: bool,
    /// Explicit leaf flag; overrides the children-based rule when present.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_leaf: Option<bool>,
    /// For flattened search results: the full path of the original option.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub origin_path: Option<ValuePath>,
}

impl CascaderOption {
    /// Create an option with the given value and no children field.
    #[must_use]
    pub fn new(value: impl Into<Key>) -> Self {
        Self {
            value: value.into(),
            label: None,
            children: None,
            disabled: false,
            is_leaf: None,
            origin_path: None,
        }
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add a child option, creating the children field if absent.
    #[must_use]
    pub fn child(mut self, option: CascaderOption) -> Self {
        self.children.get_or_insert_with(Vec::new).push(option);
        self
    }

    /// Set the children field (an empty vec marks "loaded, no children").
    #[must_use]
    pub fn with_children(mut self, children: Vec<CascaderOption>) -> Self {
        self.children = Some(children);
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the explicit leaf flag.
    #[must_use]
    pub fn with_leaf(mut self, is_leaf: bool) -> Self {
        self.is_leaf = Some(is_leaf);
        self
    }

    /// Mark this option as a flattened search result for `origin`.
    #[must_use]
    pub fn with_origin_path(mut self, origin: ValuePath) -> Self {
        self.origin_path = Some(origin);
        self
    }

    /// Find a direct child by value.
    #[must_use]
    pub fn find_child(&self, value: &Key) -> Option<&CascaderOption> {
        self.children.as_ref()?.iter().find(|c| &c.value == value)
    }

    /// Find a direct child by value, mutably. Used by hosts attaching lazily
    /// loaded children.
    pub fn find_child_mut(&mut self, value: &Key) -> Option<&mut CascaderOption> {
        self.children.as_mut()?.iter_mut().find(|c| &c.value == value)
    }
}

/// Walk `roots` along `path` and return the addressed node mutably.
///
/// Hosts use this from their load callback to attach children.
pub fn find_by_path_mut<'a>(
    roots: &'a mut [CascaderOption],
    path: &[Key],
) -> Option<&'a mut CascaderOption> {
    let (first, rest) = path.split_first()?;
    let mut current = roots.iter_mut().find(|o| &o.value == first)?;
    for key in rest {
        current = current.find_child_mut(key)?;
    }
    Some(current)
}
