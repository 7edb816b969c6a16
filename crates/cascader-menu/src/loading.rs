#![forbid(unsafe_code)]

//! Lazy-load bookkeeping.
//!
//! The tracker records which paths have an outstanding load request and
//! hands the resolved option chain to the host's loader. It never waits on
//! the loader: completion is detected later by [`LoadingTracker::reconcile`],
//! which must run against every new snapshot of the option tree.
//!
//! # Invariants
//!
//! 1. A path key is tracked at most once (set semantics).
//! 2. A tracked key is dropped as soon as its node is gone, has a children
//!    field (even an empty one), or is a leaf.
//! 3. A load that never completes stays tracked. There is no timeout and no
//!    error surfaced; hosts that need liveness time out at the loader.

use core::fmt;
use std::collections::BTreeSet;

use cascader_core::debug;

use crate::field_names::FieldNames;
use crate::key::Key;
use crate::path::{
    PathKey, ResolveMode, is_leaf, resolve_path, resolve_target, to_path_key, to_path_value_str,
};

/// Host callback receiving the resolved chain, root first.
pub type LoadDataFn<T> = Box<dyn FnMut(&[&T])>;

/// Tracks in-flight lazy loads keyed by [`PathKey`].
pub struct LoadingTracker<T> {
    loader: Option<LoadDataFn<T>>,
    keys: BTreeSet<PathKey>,
}

impl<T> Default for LoadingTracker<T> {
    fn default() -> Self {
        Self {
            loader: None,
            keys: BTreeSet::new(),
        }
    }
}

impl<T> fmt::Debug for LoadingTracker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingTracker")
            .field("has_loader", &self.loader.is_some())
            .field("keys", &self.keys)
            .finish()
    }
}

impl<T> LoadingTracker<T> {
    /// Create a tracker without a loader (lazy loading disabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with a loader.
    #[must_use]
    pub fn with_loader(loader: impl FnMut(&[&T]) + 'static) -> Self {
        Self {
            loader: Some(Box::new(loader)),
            keys: BTreeSet::new(),
        }
    }

    /// Install or remove the loader.
    pub fn set_loader(&mut self, loader: Option<LoadDataFn<T>>) {
        self.loader = loader;
    }

    /// Whether a loader is configured.
    #[must_use]
    pub fn has_loader(&self) -> bool {
        self.loader.is_some()
    }

    /// Whether opening `path` should request a load.
    ///
    /// Always false without a loader or while a search is active. Otherwise
    /// true when `path` resolves completely and its target is not a leaf.
    pub fn should_load(
        &self,
        path: &[Key],
        roots: &[T],
        fields: &FieldNames<T>,
        search_active: bool,
    ) -> bool {
        if self.loader.is_none() || search_active {
            return false;
        }
        let chain = resolve_path(path, roots, fields, ResolveMode::Exact);
        if chain.is_empty() || chain.len() != path.len() {
            return false;
        }
        chain
            .last()
            .is_some_and(|target| !is_leaf(target.option, fields))
    }

    /// Record `path` as loading and invoke the loader with its resolved chain.
    pub fn trigger(&mut self, path: &[Key], roots: &[T], fields: &FieldNames<T>) {
        let key = to_path_key(path);
        debug!(path_key = key.as_str(), "lazy load triggered");
        self.keys.insert(key);

        let chain: Vec<&T> = resolve_path(path, roots, fields, ResolveMode::Exact)
            .into_iter()
            .map(|step| step.option)
            .collect();
        if let Some(loader) = self.loader.as_mut() {
            loader(&chain);
        }
    }

    /// `should_load` + `trigger` in one step. Returns whether a load fired.
    pub fn load_if_needed(
        &mut self,
        path: &[Key],
        roots: &[T],
        fields: &FieldNames<T>,
        search_active: bool,
    ) -> bool {
        if self.should_load(path, roots, fields, search_active) {
            self.trigger(path, roots, fields);
            true
        } else {
            false
        }
    }

    /// Drop every tracked key whose load is no longer pending in `roots`.
    ///
    /// Each tracked key is examined exactly once per pass. Returns the number
    /// of keys removed.
    pub fn reconcile(&mut self, roots: &[T], fields: &FieldNames<T>) -> usize {
        let before = self.keys.len();
        self.keys.retain(|key| {
            let settled = settle_reason(key, roots, fields);
            if settled.is_some() {
                debug!(
                    path_key = key.as_str(),
                    reason = settled.unwrap_or_default(),
                    "lazy load settled"
                );
            }
            settled.is_none()
        });
        before - self.keys.len()
    }

    /// Whether `path` is tracked and still pending against `roots`.
    ///
    /// Gives the answer the next [`reconcile`](Self::reconcile) would leave
    /// behind, without mutating the tracker.
    #[must_use]
    pub fn is_pending(&self, path: &[Key], roots: &[T], fields: &FieldNames<T>) -> bool {
        let key = to_path_key(path);
        self.keys.contains(&key) && settle_reason(&key, roots, fields).is_none()
    }

    /// Whether a load for `key` is outstanding.
    #[must_use]
    pub fn is_loading(&self, key: &PathKey) -> bool {
        self.keys.contains(key)
    }

    /// Whether a load for `path` is outstanding.
    #[must_use]
    pub fn is_path_loading(&self, path: &[Key]) -> bool {
        self.keys.contains(&to_path_key(path))
    }

    /// Outstanding keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &PathKey> {
        self.keys.iter()
    }

    /// Number of outstanding loads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no load is outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Forget every outstanding load (the loader stays installed).
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Why a tracked load no longer counts as pending, if it does not.
fn settle_reason<T>(key: &PathKey, roots: &[T], fields: &FieldNames<T>) -> Option<&'static str> {
    let path = to_path_value_str(key);
    match resolve_target(&path, roots, fields, ResolveMode::Loose) {
        None => Some("missing"),
        Some(target) if fields.children(target).is_some() => Some("loaded"),
        Some(target) if is_leaf(target, fields) => Some("leaf"),
        Some(_) => None,
    }
}
