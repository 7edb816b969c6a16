#![forbid(unsafe_code)]

//! Keyboard navigation across columns.
//!
//! The navigator resolves the active path once against the listed options,
//! keeping the longest prefix that still resolves (the "cursor"), and turns
//! key presses into calls on a [`NavigationTarget`]:
//!
//! | Key | Effect |
//! |-----|--------|
//! | Up / Down | previous / next enabled option in the cursor's column, wrapping |
//! | Home / End | first / last enabled option in that column |
//! | Right (Left in RTL) | open the first enabled child of the cursor |
//! | Left (Right in RTL), Backspace | back to the parent column; closes at the top |
//! | Enter | commit the cursor's option |
//! | Escape | close the dropdown |
//!
//! Horizontal moves and Backspace do nothing while a search is active.

use cascader_core::event::{KeyCode, KeyEvent};
use cascader_core::trace;

use crate::config::Direction;
use crate::field_names::FieldNames;
use crate::key::{Key, ValuePath};
use crate::selection::commit_target;

/// Receiver of keyboard navigation results.
pub trait NavigationTarget<T> {
    /// Make `path` active (and lazy-load it if due).
    fn on_path_open(&mut self, path: &[Key]);

    /// Commit `path`, whose last option is `option`, if it is selectable.
    fn on_keyboard_select(&mut self, path: &[Key], option: &T);

    /// Show or hide the dropdown.
    fn toggle_open(&mut self, open: bool);
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key is not handled here (or had nothing to act on).
    Ignored,
    /// The active path changed.
    Navigated,
    /// The cursor's option was handed to `on_keyboard_select`.
    Submitted,
    /// The dropdown was asked to close.
    Closed,
}

impl KeyOutcome {
    /// Whether the host should treat the key as consumed.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// A snapshot of where the keyboard cursor sits.
pub struct KeyboardNavigator<'a, T> {
    /// The resolvable prefix of the active path.
    cells: ValuePath,
    /// Options of the column holding the cursor.
    level: &'a [T],
    /// Position of the cursor within `level`.
    index: Option<usize>,
    roots: &'a [T],
    fields: FieldNames<T>,
    direction: Direction,
    search_active: bool,
}

impl<'a, T> KeyboardNavigator<'a, T> {
    /// Resolve `active` against `options` (the search results while
    /// searching, the roots otherwise). `roots` is used to find the original
    /// option behind a search result on commit.
    pub fn new(
        active: &[Key],
        options: &'a [T],
        roots: &'a [T],
        fields: FieldNames<T>,
        direction: Direction,
        search_active: bool,
    ) -> Self {
        let mut cells = Vec::new();
        let mut level = options;
        let mut cursor_level = options;
        let mut index = None;
        for segment in active {
            let Some(found) = level.iter().position(|o| fields.value(o) == segment) else {
                break;
            };
            cells.push(segment.clone());
            cursor_level = level;
            index = Some(found);
            level = fields.children(&level[found]).unwrap_or(&[]);
        }
        Self {
            cells,
            level: cursor_level,
            index,
            roots,
            fields,
            direction,
            search_active,
        }
    }

    /// The resolvable prefix of the active path.
    #[must_use]
    pub fn cells(&self) -> &[Key] {
        &self.cells
    }

    /// The option under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        self.index.and_then(|i| self.level.get(i))
    }

    /// Handle one key event.
    pub fn handle_key(&self, key: &KeyEvent, target: &mut impl NavigationTarget<T>) -> KeyOutcome {
        if !key.is_actionable() {
            return KeyOutcome::Ignored;
        }
        trace!(code = ?key.code, depth = self.cells.len(), "cascader key");

        let rtl = self.direction.is_rtl();
        match key.code {
            KeyCode::Up => self.offset(-1, target),
            KeyCode::Down => self.offset(1, target),
            KeyCode::Home => self.jump(self.first_enabled(), target),
            KeyCode::End => self.jump(self.last_enabled(), target),
            KeyCode::Left if !self.search_active => {
                if rtl {
                    self.next_column(target)
                } else {
                    self.prev_column(target)
                }
            }
            KeyCode::Right if !self.search_active => {
                if rtl {
                    self.prev_column(target)
                } else {
                    self.next_column(target)
                }
            }
            KeyCode::Backspace if !self.search_active => self.prev_column(target),
            KeyCode::Enter => self.submit(target),
            KeyCode::Escape => {
                target.toggle_open(false);
                KeyOutcome::Closed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn is_enabled(&self, option: &T) -> bool {
        !self.fields.is_disabled(option)
    }

    fn open_sibling(&self, index: usize, target: &mut impl NavigationTarget<T>) -> KeyOutcome {
        let mut next = self.cells.clone();
        next.pop();
        next.push(self.fields.value(&self.level[index]).clone());
        target.on_path_open(&next);
        KeyOutcome::Navigated
    }

    fn offset(&self, step: isize, target: &mut impl NavigationTarget<T>) -> KeyOutcome {
        let len = self.level.len();
        if len == 0 {
            return KeyOutcome::Ignored;
        }
        // Nothing active: Down starts at the top, Up at the bottom.
        let mut current = match self.index {
            Some(i) => i,
            None if step < 0 => 0,
            None => len - 1,
        };
        for _ in 0..len {
            current = if step < 0 {
                current.checked_sub(1).unwrap_or(len - 1)
            } else {
                (current + 1) % len
            };
            if self.is_enabled(&self.level[current]) {
                return self.open_sibling(current, target);
            }
        }
        KeyOutcome::Ignored
    }

    fn first_enabled(&self) -> Option<usize> {
        self.level.iter().position(|o| self.is_enabled(o))
    }

    fn last_enabled(&self) -> Option<usize> {
        self.level.iter().rposition(|o| self.is_enabled(o))
    }

    fn jump(&self, index: Option<usize>, target: &mut impl NavigationTarget<T>) -> KeyOutcome {
        match index {
            Some(i) if Some(i) != self.index => self.open_sibling(i, target),
            _ => KeyOutcome::Ignored,
        }
    }

    fn prev_column(&self, target: &mut impl NavigationTarget<T>) -> KeyOutcome {
        if self.cells.len() > 1 {
            target.on_path_open(&self.cells[..self.cells.len() - 1]);
            KeyOutcome::Navigated
        } else {
            target.toggle_open(false);
            KeyOutcome::Closed
        }
    }

    fn next_column(&self, target: &mut impl NavigationTarget<T>) -> KeyOutcome {
        let Some(current) = self.current() else {
            return KeyOutcome::Ignored;
        };
        let children = self.fields.children(current).unwrap_or(&[]);
        let Some(child) = children.iter().find(|o| self.is_enabled(o)) else {
            return KeyOutcome::Ignored;
        };
        let mut next = self.cells.clone();
        next.push(self.fields.value(child).clone());
        target.on_path_open(&next);
        KeyOutcome::Navigated
    }

    fn submit(&self, target: &mut impl NavigationTarget<T>) -> KeyOutcome {
        let Some(option) = self.current() else {
            return KeyOutcome::Ignored;
        };
        let (path, option) = commit_target(&self.cells, option, self.roots, &self.fields);
        target.on_keyboard_select(path, option);
        KeyOutcome::Submitted
    }
}
