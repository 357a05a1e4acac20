//! Descriptor and option types shared by every stage of resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared type of a configurable value. Drives coercion of raw
/// argv/env strings; fallbacks are never checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    Number,
    String,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved (or fallback) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Number(n) => write!(f, "{n}"),
            ConfigValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Number(n.into())
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

/// Describes one configurable value and where it may come from.
///
/// ```ignore
/// let verbose = ValueDescriptor::new(Kind::Boolean, "verbose")
///     .long("verbose")
///     .short('v')
///     .env("APP_VERBOSE")
///     .fallback(false);
/// ```
///
/// Without a `fallback` the value is mandatory: it must come from argv or
/// the environment or gathering fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueDescriptor {
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<ConfigValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_argv_long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_argv_short: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_env: Option<String>,
    pub name_returned: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ValueDescriptor {
    pub fn new(kind: Kind, name_returned: &str) -> Self {
        Self {
            kind,
            fallback: None,
            name_argv_long: None,
            name_argv_short: None,
            name_env: None,
            name_returned: name_returned.to_string(),
            note: None,
        }
    }

    /// Accept `--name` on the command line.
    pub fn long(mut self, name: &str) -> Self {
        self.name_argv_long = Some(name.to_string());
        self
    }

    /// Accept `-c` on the command line, alone or inside a run like `-abc`.
    pub fn short(mut self, c: char) -> Self {
        self.name_argv_short = Some(c);
        self
    }

    pub fn env(mut self, name: &str) -> Self {
        self.name_env = Some(name.to_string());
        self
    }

    /// Value used when neither argv nor env supplies a usable one. Emitted
    /// verbatim, even when its type disagrees with `kind`.
    pub fn fallback<V: Into<ConfigValue>>(mut self, value: V) -> Self {
        self.fallback = Some(value.into());
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    /// Whether any source at all could produce this value.
    pub fn has_possible_value(&self) -> bool {
        self.fallback.is_some()
            || self.name_argv_long.is_some()
            || self.name_argv_short.is_some()
            || self.name_env.is_some()
    }
}

/// Label used in messages when the caller does not supply one.
pub const DEFAULT_BEGIN: &str = "gather_config()";

/// Knobs for a single gather call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GatherOptions {
    /// Tolerate argv flags that no descriptor declares.
    pub allow_unexpected_argv: bool,
    /// Consult the environment before argv.
    pub prefer_env: bool,
    /// Prefix for diagnostic messages. Empty means no prefix.
    pub begin: String,
}

impl Default for GatherOptions {
    fn default() -> Self {
        Self {
            allow_unexpected_argv: false,
            prefer_env: false,
            begin: DEFAULT_BEGIN.to_string(),
        }
    }
}

/// Render `begin` as a message prefix: `"label: "`, or nothing when empty.
pub(crate) fn label(begin: &str) -> String {
    if begin.is_empty() {
        String::new()
    } else {
        format!("{begin}: ")
    }
}
