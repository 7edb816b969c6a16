#![forbid(unsafe_code)]

//! Option values and value paths.

use core::fmt;

/// The value of a single option.
///
/// Option values are either strings or integers. The two never compare
/// equal: `Key::Str("1")` and `Key::Int(1)` are distinct keys, and their
/// path keys differ as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Key {
    /// Integer value.
    Int(i64),
    /// String value.
    Str(String),
}

impl Key {
    /// Compare by display form, so `Key::Int(7)` matches `Key::Str("7")`.
    #[must_use]
    pub fn loosely_eq(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::Str(a), Key::Str(b)) => a == b,
            (Key::Int(a), Key::Str(b)) | (Key::Str(b), Key::Int(a)) => a.to_string() == *b,
        }
    }

    /// Borrow the string payload, if this is a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(i64::from(n))
    }
}

/// An ordered sequence of option values, one per tree level.
pub type ValuePath = Vec<Key>;

/// Build a [`ValuePath`] from anything convertible into [`Key`].
///
/// ```
/// use cascader_menu::key::{Key, path};
///
/// assert_eq!(path(["zhejiang", "hangzhou"]), vec![Key::from("zhejiang"), Key::from("hangzhou")]);
/// ```
pub fn path<K: Into<Key>>(keys: impl IntoIterator<Item = K>) -> ValuePath {
    keys.into_iter().map(Into::into).collect()
}
