//! The gathered result: typed values keyed by returned name, plus the
//! warnings collected along the way.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::{ConfigValue, Kind, label};

/// Key under which the serialized form carries [`Gathered::warnings_text`].
pub const WARNINGS_KEY: &str = "WARNINGS";

/// Where a raw value was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    ArgvLong(String),
    ArgvShort(char),
    Env(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::ArgvLong(name) => write!(f, "argv option '--{name}'"),
            Source::ArgvShort(c) => write!(f, "argv option '-{c}'"),
            Source::Env(name) => write!(f, "env variable '{name}'"),
        }
    }
}

/// A value that was present in a source but could not be coerced. Gathering
/// carries on; a later source or the fallback may still supply the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub begin: String,
    /// Returned name of the descriptor.
    pub name: String,
    pub source: Source,
    pub kind: Kind,
    /// The raw input, or `None` for a flag given without a value.
    pub raw: Option<String>,
    pub reason: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} ", label(&self.begin), self.source)?;
        match &self.raw {
            Some(raw) => write!(f, "value {raw:?}")?,
            None => f.write_str("without a value")?,
        }
        write!(
            f,
            " is not a valid {} for '{}': {}",
            self.kind, self.name, self.reason
        )
    }
}

/// Result of a successful gather.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gathered {
    /// Values in descriptor order.
    pub values: IndexMap<String, ConfigValue>,
    pub warnings: Vec<Warning>,
}

impl Gathered {
    /// Value resolved for `name`. Only descriptor values live here; the
    /// warnings are read with [`warnings_text`](Self::warnings_text) or
    /// [`warnings`](Self::warnings), never through `get("WARNINGS")`.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ConfigValue::as_bool)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ConfigValue::as_number)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ConfigValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every warning on its own newline-terminated line; empty when there
    /// were none.
    pub fn warnings_text(&self) -> String {
        self.warnings.iter().map(|w| format!("{w}\n")).collect()
    }
}

impl fmt::Display for Gathered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.values.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

/// Serializes as one flat map: the `WARNINGS` key first, then each value
/// under its returned name. A descriptor returned as `WARNINGS` is left out
/// of this form; the warnings text always owns that key.
impl Serialize for Gathered {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let values: Vec<_> = self
            .values
            .iter()
            .filter(|(key, _)| key.as_str() != WARNINGS_KEY)
            .collect();
        let mut map = serializer.serialize_map(Some(values.len() + 1))?;
        map.serialize_entry(WARNINGS_KEY, &self.warnings_text())?;
        for (key, value) in values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Gathered {
        let mut values = IndexMap::new();
        values.insert("port".to_string(), ConfigValue::Number(8080.0));
        values.insert("debug".to_string(), ConfigValue::Bool(true));
        values.insert("host".to_string(), ConfigValue::from("localhost"));
        Gathered {
            values,
            warnings: vec![],
        }
    }

    fn warning(raw: Option<&str>) -> Warning {
        Warning {
            begin: "app".into(),
            name: "port".into(),
            source: Source::Env("PORT".into()),
            kind: Kind::Number,
            raw: raw.map(String::from),
            reason: "expected a number".into(),
        }
    }

    #[test]
    fn typed_accessors() {
        let g = sample();
        assert_eq!(g.get_number("port"), Some(8080.0));
        assert_eq!(g.get_bool("debug"), Some(true));
        assert_eq!(g.get_str("host"), Some("localhost"));
        assert_eq!(g.get_str("port"), None);
        assert_eq!(g.get("missing"), None);
        assert_eq!(g.get("WARNINGS"), None);
    }

    #[test]
    fn display_lists_in_descriptor_order() {
        assert_eq!(
            sample().to_string(),
            "port = 8080\ndebug = true\nhost = \"localhost\""
        );
    }

    #[test]
    fn warning_display() {
        assert_eq!(
            warning(Some("abc")).to_string(),
            "app: env variable 'PORT' value \"abc\" is not a valid number for 'port': expected a number"
        );
        let mut bare = warning(None);
        bare.source = Source::ArgvShort('p');
        bare.begin = String::new();
        assert_eq!(
            bare.to_string(),
            "argv option '-p' without a value is not a valid number for 'port': expected a number"
        );
    }

    #[test]
    fn warnings_text_is_newline_terminated() {
        let mut g = sample();
        assert_eq!(g.warnings_text(), "");
        g.warnings = vec![warning(Some("a")), warning(Some("b"))];
        let text = g.warnings_text();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn serializes_flat_with_warnings_key() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            v,
            json!({"WARNINGS": "", "port": 8080.0, "debug": true, "host": "localhost"})
        );
    }

    #[test]
    fn warnings_text_wins_serialized_key_clash() {
        let mut g = sample();
        g.values
            .insert("WARNINGS".to_string(), ConfigValue::from("shadowed"));
        g.warnings = vec![warning(Some("a"))];
        let v = serde_json::to_value(&g).unwrap();
        assert_eq!(v["WARNINGS"], json!(g.warnings_text()));
        assert_eq!(v.as_object().unwrap().len(), 4);
        assert_eq!(g.get_str("WARNINGS"), Some("shadowed"));
    }
}
