#![forbid(unsafe_code)]

//! Path resolution, leaf classification and canonical path keys.
//!
//! # Path key encoding
//!
//! A [`PathKey`] joins one segment per level with `/`. Each segment starts
//! with a type tag: `i` followed by a decimal integer, or `s` followed by the
//! string with `\` written as `\\` and `/` written as `\/`. The empty path
//! encodes to the empty string.
//!
//! | Path | Key |
//! |------|-----|
//! | `[]` | `` |
//! | `[""]` | `s` |
//! | `["a", 1]` | `sa/i1` |
//! | `["a/b"]` | `sa\/b` |
//!
//! The encoding is injective and [`to_path_value_str`] inverts it exactly.

use core::fmt;
use std::collections::HashSet;

use crate::field_names::FieldNames;
use crate::key::{Key, ValuePath};

const SEPARATOR: char = '/';
const ESCAPE: char = '\\';
const TAG_INT: char = 'i';
const TAG_STR: char = 's';

// ============================================================================
// Resolution
// ============================================================================

/// How path segments are matched against option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Values must be equal, including their variant.
    #[default]
    Exact,
    /// Values match when their display forms are equal (`7` matches `"7"`).
    Loose,
}

impl ResolveMode {
    fn matches(self, option_value: &Key, segment: &Key) -> bool {
        match self {
            Self::Exact => option_value == segment,
            Self::Loose => option_value.loosely_eq(segment),
        }
    }
}

/// One resolved step of a path.
#[derive(Debug)]
pub struct ResolvedOption<'a, T> {
    /// The option node at this depth.
    pub option: &'a T,
    /// The option's own value.
    pub key: &'a Key,
}

impl<T> Clone for ResolvedOption<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResolvedOption<'_, T> {}

/// Walk `roots` along `path`, returning the chain of matched options.
///
/// Resolution stops at the first segment with no match at its level, so the
/// result may be shorter than `path`. It never fails.
pub fn resolve_path<'a, T>(
    path: &[Key],
    roots: &'a [T],
    fields: &FieldNames<T>,
    mode: ResolveMode,
) -> Vec<ResolvedOption<'a, T>> {
    let mut chain = Vec::with_capacity(path.len());
    let mut level: &'a [T] = roots;
    for segment in path {
        let Some(option) = level
            .iter()
            .find(|option| mode.matches(fields.value(option), segment))
        else {
            break;
        };
        chain.push(ResolvedOption {
            option,
            key: fields.value(option),
        });
        level = fields.children(option).unwrap_or(&[]);
    }
    chain
}

/// The option addressed by `path`, if every segment resolves.
pub fn resolve_target<'a, T>(
    path: &[Key],
    roots: &'a [T],
    fields: &FieldNames<T>,
    mode: ResolveMode,
) -> Option<&'a T> {
    if path.is_empty() {
        return None;
    }
    let chain = resolve_path(path, roots, fields, mode);
    if chain.len() == path.len() {
        chain.last().map(|step| step.option)
    } else {
        None
    }
}

/// Whether `option` is a leaf.
///
/// An explicit leaf flag decides when present. Otherwise an option is a leaf
/// exactly when its children field is absent; an empty child list means
/// "loaded, no children" and is not a leaf.
#[must_use]
pub fn is_leaf<T>(option: &T, fields: &FieldNames<T>) -> bool {
    fields
        .leaf_flag(option)
        .unwrap_or_else(|| fields.children(option).is_none())
}

// ============================================================================
// Path keys
// ============================================================================

/// Canonical, injective string form of a [`ValuePath`].
///
/// A `PathKey` always holds a well-formed encoding; foreign strings enter
/// through [`PathKey::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PathKey(String);

impl PathKey {
    /// Validate and wrap an encoded key.
    pub fn parse(encoded: &str) -> Result<Self, PathKeyError> {
        let path = decode(encoded)?;
        let canonical = encode(&path);
        if canonical != encoded {
            return Err(PathKeyError::NonCanonical {
                expected: canonical,
            });
        }
        Ok(Self(canonical))
    }

    /// The encoded form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the key of the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&[Key]> for PathKey {
    fn from(path: &[Key]) -> Self {
        to_path_key(path)
    }
}

/// Encode a path.
#[must_use]
pub fn to_path_key(path: &[Key]) -> PathKey {
    PathKey(encode(path))
}

/// Encode many paths into a set.
pub fn to_path_keys<'p>(paths: impl IntoIterator<Item = &'p ValuePath>) -> HashSet<PathKey> {
    paths.into_iter().map(|p| to_path_key(p)).collect()
}

/// Decode a path key back into its path.
#[must_use]
pub fn to_path_value_str(key: &PathKey) -> ValuePath {
    // A PathKey is only ever built from `encode` or a validated parse.
    decode(&key.0).unwrap_or_default()
}

fn encode(path: &[Key]) -> String {
    let mut out = String::new();
    for (i, key) in path.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        match key {
            Key::Int(n) => {
                out.push(TAG_INT);
                out.push_str(&n.to_string());
            }
            Key::Str(s) => {
                out.push(TAG_STR);
                for ch in s.chars() {
                    if ch == ESCAPE || ch == SEPARATOR {
                        out.push(ESCAPE);
                    }
                    out.push(ch);
                }
            }
        }
    }
    out
}

fn decode(encoded: &str) -> Result<ValuePath, PathKeyError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments: Vec<String> = vec![String::new()];
    let mut chars = encoded.chars();
    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => match chars.next() {
                Some(escaped @ (ESCAPE | SEPARATOR)) => {
                    if let Some(current) = segments.last_mut() {
                        current.push(escaped);
                    }
                }
                Some(other) => return Err(PathKeyError::InvalidEscape { found: other }),
                None => return Err(PathKeyError::DanglingEscape),
            },
            SEPARATOR => segments.push(String::new()),
            other => {
                if let Some(current) = segments.last_mut() {
                    current.push(other);
                }
            }
        }
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| decode_segment(index, segment))
        .collect()
}

fn decode_segment(index: usize, segment: String) -> Result<Key, PathKeyError> {
    let mut chars = segment.chars();
    match chars.next() {
        None => Err(PathKeyError::EmptySegment { index }),
        Some(TAG_STR) => Ok(Key::Str(chars.as_str().to_owned())),
        Some(TAG_INT) => {
            let digits = chars.as_str();
            digits
                .parse::<i64>()
                .map(Key::Int)
                .map_err(|_| PathKeyError::InvalidInteger {
                    index,
                    text: digits.to_owned(),
                })
        }
        Some(tag) => Err(PathKeyError::UnknownTag { index, tag }),
    }
}

/// Reasons an encoded string is not a valid [`PathKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKeyError {
    /// A segment between separators was empty (no type tag).
    EmptySegment {
        /// Segment position.
        index: usize,
    },
    /// A segment started with something other than `i` or `s`.
    UnknownTag {
        /// Segment position.
        index: usize,
        /// The offending tag.
        tag: char,
    },
    /// An `i` segment did not hold a valid integer.
    InvalidInteger {
        /// Segment position.
        index: usize,
        /// The text after the tag.
        text: String,
    },
    /// A backslash was followed by something other than `\` or `/`.
    InvalidEscape {
        /// The character after the backslash.
        found: char,
    },
    /// The key ended in the middle of an escape.
    DanglingEscape,
    /// The string decodes, but is not the canonical spelling of its path.
    NonCanonical {
        /// The canonical spelling.
        expected: String,
    },
}

impl fmt::Display for PathKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySegment { index } => write!(f, "empty path segment at {index}"),
            Self::UnknownTag { index, tag } => {
                write!(f, "unknown segment tag {tag:?} at {index}")
            }
            Self::InvalidInteger { index, text } => {
                write!(f, "invalid integer segment {text:?} at {index}")
            }
            Self::InvalidEscape { found } => write!(f, "invalid escape \\{found}"),
            Self::DanglingEscape => f.write_str("path key ends inside an escape"),
            Self::NonCanonical { expected } => {
                write!(f, "non-canonical path key (expected {expected:?})")
            }
        }
    }
}

impl std::error::Error for PathKeyError {}
