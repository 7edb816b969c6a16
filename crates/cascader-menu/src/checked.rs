#![forbid(unsafe_code)]

//! Checked and half-checked path sets for multi-select.
//!
//! The host owns the selection. This module only turns the host's value
//! lists into lookup sets, and offers [`conduct_check`] for hosts that want
//! the usual tree propagation (checking a parent checks its children, a
//! fully checked level checks its parent, a partially checked level marks
//! its parent half-checked).

use std::collections::HashSet;

use crate::field_names::FieldNames;
use crate::key::{Key, ValuePath};
use crate::path::{PathKey, to_path_key, to_path_keys};

/// Disjoint checked / half-checked key sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckedState {
    checked: HashSet<PathKey>,
    half_checked: HashSet<PathKey>,
}

impl CheckedState {
    /// Empty state (single-select, or nothing selected).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the host's selected and half-selected value paths.
    ///
    /// A path listed in both is treated as checked.
    pub fn from_values<'p>(
        values: impl IntoIterator<Item = &'p ValuePath>,
        half_values: impl IntoIterator<Item = &'p ValuePath>,
    ) -> Self {
        let checked = to_path_keys(values);
        let mut half_checked = to_path_keys(half_values);
        half_checked.retain(|key| !checked.contains(key));
        Self {
            checked,
            half_checked,
        }
    }

    /// Whether `path` is checked.
    #[must_use]
    pub fn is_checked(&self, path: &[Key]) -> bool {
        self.checked.contains(&to_path_key(path))
    }

    /// Whether `path` is half-checked.
    #[must_use]
    pub fn is_half_checked(&self, path: &[Key]) -> bool {
        self.half_checked.contains(&to_path_key(path))
    }

    /// Whether the encoded `key` is checked.
    #[must_use]
    pub fn contains_checked(&self, key: &PathKey) -> bool {
        self.checked.contains(key)
    }

    /// Whether the encoded `key` is half-checked.
    #[must_use]
    pub fn contains_half_checked(&self, key: &PathKey) -> bool {
        self.half_checked.contains(key)
    }

    /// Checked keys, unordered.
    pub fn checked_keys(&self) -> impl Iterator<Item = &PathKey> {
        self.checked.iter()
    }

    /// Half-checked keys, unordered.
    pub fn half_checked_keys(&self) -> impl Iterator<Item = &PathKey> {
        self.half_checked.iter()
    }

    /// Whether nothing is checked or half-checked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty() && self.half_checked.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Checked,
    Half,
    Clear,
}

/// Propagate `checked_paths` through the tree.
///
/// - A checked option checks all of its enabled descendants.
/// - An option whose enabled children are all checked becomes checked.
/// - An option with some checked or half-checked children becomes
///   half-checked.
///
/// Disabled children are ignored when deciding whether every child is
/// checked, and never inherit a check from their parent. Paths that do not
/// resolve in `roots` are ignored.
pub fn conduct_check<'p, T>(
    checked_paths: impl IntoIterator<Item = &'p ValuePath>,
    roots: &[T],
    fields: &FieldNames<T>,
) -> CheckedState {
    let seeds = to_path_keys(checked_paths);
    let mut state = CheckedState::new();
    let mut prefix = Vec::new();
    for option in roots {
        visit(option, &mut prefix, false, &seeds, fields, &mut state);
    }
    state
}

fn visit<T>(
    option: &T,
    prefix: &mut ValuePath,
    parent_checked: bool,
    seeds: &HashSet<PathKey>,
    fields: &FieldNames<T>,
    state: &mut CheckedState,
) -> Mark {
    prefix.push(fields.value(option).clone());
    let key = to_path_key(prefix);
    let disabled = fields.is_disabled(option);
    let self_checked = seeds.contains(&key) || (parent_checked && !disabled);

    let mut enabled = 0usize;
    let mut enabled_checked = 0usize;
    let mut any_marked = false;
    for child in fields.children(option).unwrap_or(&[]) {
        let mark = visit(child, prefix, self_checked, seeds, fields, state);
        if mark != Mark::Clear {
            any_marked = true;
        }
        if !fields.is_disabled(child) {
            enabled += 1;
            if mark == Mark::Checked {
                enabled_checked += 1;
            }
        }
    }
    prefix.pop();

    let mark = if self_checked || (enabled > 0 && enabled_checked == enabled) {
        Mark::Checked
    } else if any_marked {
        Mark::Half
    } else {
        Mark::Clear
    };
    match mark {
        Mark::Checked => {
            state.checked.insert(key);
        }
        Mark::Half => {
            state.half_checked.insert(key);
        }
        Mark::Clear => {}
    }
    mark
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::path;
    use crate::option::CascaderOption;

    fn tree() -> Vec<CascaderOption> {
        vec![
            CascaderOption::new("zj")
                .child(
                    CascaderOption::new("hz")
                        .child(CascaderOption::new("xh"))
                        .child(CascaderOption::new("bj")),
                )
                .child(CascaderOption::new("nb")),
            CascaderOption::new("js").child(CascaderOption::new("nj")),
        ]
    }

    #[test]
    fn from_values_keeps_sets_disjoint() {
        let both = path(["a"]);
        let state = CheckedState::from_values([&both], [&both, &path(["b"])]);
        assert!(state.is_checked(&both));
        assert!(!state.is_half_checked(&both));
        assert!(state.is_half_checked(&path(["b"])));
    }

    #[test]
    fn partial_selection_marks_ancestors_half() {
        let fields = FieldNames::standard();
        let picked = path(["zj", "hz", "xh"]);
        let state = conduct_check([&picked], &tree(), &fields);
        assert!(state.is_checked(&picked));
        assert!(state.is_half_checked(&path(["zj", "hz"])));
        assert!(state.is_half_checked(&path(["zj"])));
        assert!(!state.is_checked(&path(["zj"])));
        assert!(!state.is_half_checked(&path(["js"])));
    }

    #[test]
    fn full_level_checks_parent() {
        let fields = FieldNames::standard();
        let a = path(["zj", "hz", "xh"]);
        let b = path(["zj", "hz", "bj"]);
        let state = conduct_check([&a, &b], &tree(), &fields);
        assert!(state.is_checked(&path(["zj", "hz"])));
        assert!(state.is_half_checked(&path(["zj"])));
    }

    #[test]
    fn checked_parent_checks_descendants() {
        let fields = FieldNames::standard();
        let state = conduct_check([&path(["zj"])], &tree(), &fields);
        assert!(state.is_checked(&path(["zj", "hz", "bj"])));
        assert!(state.is_checked(&path(["zj", "nb"])));
        assert!(!state.is_checked(&path(["js", "nj"])));
    }

    #[test]
    fn disabled_children_do_not_block_full_check() {
        let fields = FieldNames::standard();
        let roots = vec![
            CascaderOption::new("p")
                .child(CascaderOption::new("on"))
                .child(CascaderOption::new("off").with_disabled(true)),
        ];
        let state = conduct_check([&path(["p", "on"])], &roots, &fields);
        assert!(state.is_checked(&path(["p"])));
        // and a checked parent does not check its disabled child
        let state = conduct_check([&path(["p"])], &roots, &fields);
        assert!(!state.is_checked(&path(["p", "off"])));
    }

    #[test]
    fn unresolved_paths_are_ignored() {
        let fields = FieldNames::standard();
        let state = conduct_check([&path(["nowhere"])], &tree(), &fields);
        assert!(state.is_empty());
    }
}
