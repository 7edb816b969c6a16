#![forbid(unsafe_code)]

//! Cascading multi-column option menu.
//!
//! Given an option tree and an active path through it, the menu derives the
//! visible columns, tracks lazy loads, propagates checked state and turns
//! pointer and keyboard input into selection callbacks on the host.
//!
//! Rendering is left to the host: [`CascaderMenu::view`] hands back plain
//! render props per column and row.
//!
//! # Feature flags
//!
//! - `tracing`: spans around column derivation, events for lazy-load
//!   triggers, reconciliation and dropdown closes.
//! - `tracing-json`: `tracing` plus `cascader_core::logging::init_json_subscriber`.
//! - `serde`: `Serialize`/`Deserialize` for [`Key`] and [`CascaderOption`].

pub mod active;
pub mod checked;
pub mod columns;
pub mod config;
pub mod field_names;
pub mod key;
pub mod keyboard;
pub mod loading;
pub mod menu;
pub mod option;
pub mod path;
pub mod selection;

pub use active::ActiveState;
pub use checked::{CheckedState, conduct_check};
pub use columns::{Column, ColumnItem, derive_columns, derive_display_columns};
pub use config::{CascaderConfig, ConfigError, Direction, ExpandTrigger};
pub use field_names::FieldNames;
pub use key::{Key, ValuePath};
pub use keyboard::{KeyOutcome, KeyboardNavigator, NavigationTarget};
pub use loading::LoadingTracker;
pub use menu::{CascaderMenu, ColumnEntry, ColumnView, MenuContext, MenuView};
pub use option::CascaderOption;
pub use path::{PathKey, PathKeyError, is_leaf, resolve_path, to_path_key, to_path_value_str};
pub use selection::{SelectionCoordinator, SelectionHost};

pub use cascader_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
