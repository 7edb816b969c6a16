#![forbid(unsafe_code)]

//! Menu policies and environment overrides.
//!
//! # Environment variables
//!
//! | Variable | Values |
//! |----------|--------|
//! | `CASCADER_CHANGE_ON_SELECT` | `1/0/true/false/yes/no/on/off` |
//! | `CASCADER_EXPAND_TRIGGER` | `click`, `hover` |
//! | `CASCADER_MULTIPLE` | `1/0/true/false/yes/no/on/off` |
//! | `CASCADER_DIRECTION` | `ltr`, `rtl` |
//! | `CASCADER_NOT_FOUND_CONTENT` | any non-blank text |
//!
//! Invalid values keep the default and are reported in
//! [`CascaderConfigParse::errors`].

use core::fmt;
use std::env;

const ENV_CHANGE_ON_SELECT: &str = "CASCADER_CHANGE_ON_SELECT";
const ENV_EXPAND_TRIGGER: &str = "CASCADER_EXPAND_TRIGGER";
const ENV_MULTIPLE: &str = "CASCADER_MULTIPLE";
const ENV_DIRECTION: &str = "CASCADER_DIRECTION";
const ENV_NOT_FOUND_CONTENT: &str = "CASCADER_NOT_FOUND_CONTENT";

/// Default label of the empty placeholder.
pub const DEFAULT_NOT_FOUND_CONTENT: &str = "Not Found";

/// What opens a sub-column under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpandTrigger {
    /// Clicking an option opens its children.
    #[default]
    Click,
    /// Hovering an option opens its children.
    Hover,
}

impl ExpandTrigger {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "click" => Some(Self::Click),
            "hover" => Some(Self::Hover),
            _ => None,
        }
    }

    /// Lowercase name, as accepted by `CASCADER_EXPAND_TRIGGER`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Hover => "hover",
        }
    }
}

impl fmt::Display for ExpandTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal layout direction. RTL swaps the meaning of Left and Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }

    /// Lowercase name, as accepted by `CASCADER_DIRECTION`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Whether this is right to left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection and navigation policies of a cascader menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascaderConfig {
    /// Every level is selectable, not only leaves.
    pub change_on_select: bool,
    /// What opens a sub-column under the pointer.
    pub expand_trigger: ExpandTrigger,
    /// Multi-select (checkbox) mode.
    pub multiple: bool,
    /// Layout direction.
    pub direction: Direction,
    /// Label of the placeholder shown when there is nothing to list.
    pub not_found_content: String,
}

impl Default for CascaderConfig {
    fn default() -> Self {
        Self {
            change_on_select: false,
            expand_trigger: ExpandTrigger::Click,
            multiple: false,
            direction: Direction::Ltr,
            not_found_content: DEFAULT_NOT_FOUND_CONTENT.to_owned(),
        }
    }
}

/// Result of reading the configuration from the environment.
#[derive(Debug, Clone)]
pub struct CascaderConfigParse {
    /// The config with every valid override applied.
    pub config: CascaderConfig,
    /// Overrides that were rejected and left at their default.
    pub errors: Vec<ConfigError>,
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Config field the value was meant for.
    pub field: &'static str,
    /// The rejected raw value.
    pub value: String,
    /// What was expected instead.
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl CascaderConfig {
    /// Set whether every level is selectable.
    #[must_use]
    pub fn with_change_on_select(mut self, change_on_select: bool) -> Self {
        self.change_on_select = change_on_select;
        self
    }

    /// Set what opens a sub-column.
    #[must_use]
    pub fn with_expand_trigger(mut self, expand_trigger: ExpandTrigger) -> Self {
        self.expand_trigger = expand_trigger;
        self
    }

    /// Set multi-select mode.
    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set the layout direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the placeholder label.
    #[must_use]
    pub fn with_not_found_content(mut self, content: impl Into<String>) -> Self {
        self.not_found_content = content.into();
        self
    }

    /// Whether sub-columns open on hover.
    #[must_use]
    pub fn hover_trigger(&self) -> bool {
        self.expand_trigger == ExpandTrigger::Hover
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> CascaderConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config through an arbitrary variable lookup.
    pub fn from_env_with<F>(mut get: F) -> CascaderConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_CHANGE_ON_SELECT) {
            match parse_bool(&value) {
                Some(parsed) => config.change_on_select = parsed,
                None => errors.push(ConfigError::new(
                    "change_on_select",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Some(value) = get(ENV_EXPAND_TRIGGER) {
            match ExpandTrigger::parse(&value) {
                Some(parsed) => config.expand_trigger = parsed,
                None => errors.push(ConfigError::new(
                    "expand_trigger",
                    value,
                    "expected click|hover",
                )),
            }
        }

        if let Some(value) = get(ENV_MULTIPLE) {
            match parse_bool(&value) {
                Some(parsed) => config.multiple = parsed,
                None => errors.push(ConfigError::new(
                    "multiple",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Some(value) = get(ENV_DIRECTION) {
            match Direction::parse(&value) {
                Some(parsed) => config.direction = parsed,
                None => errors.push(ConfigError::new("direction", value, "expected ltr|rtl")),
            }
        }

        if let Some(value) = get(ENV_NOT_FOUND_CONTENT) {
            if value.trim().is_empty() {
                errors.push(ConfigError::new(
                    "not_found_content",
                    value,
                    "must not be blank",
                ));
            } else {
                config.not_found_content = value;
            }
        }

        if let Err(mut validation) = config.validate() {
            errors.append(&mut validation);
        }

        CascaderConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.not_found_content.trim().is_empty() {
            errors.push(ConfigError::new(
                "not_found_content",
                self.not_found_content.clone(),
                "must not be blank",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[inline]
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
