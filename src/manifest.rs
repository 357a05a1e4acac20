//! Descriptor manifests: declare descriptors in TOML instead of code.
//!
//! ```toml
//! [[value]]
//! kind = "number"
//! nameArgvLong = "port"
//! nameEnv = "APP_PORT"
//! nameReturned = "port"
//! fallback = 8080
//! ```
//!
//! The manifest is parsed, then validated exactly like any other loose
//! descriptor list.

use serde_json::Value;

use crate::error::GatherError;
use crate::types::ValueDescriptor;
use crate::validate;

/// The array-of-tables key holding descriptors.
pub const MANIFEST_KEY: &str = "value";

/// Parse and validate the `[[value]]` tables of a TOML document. A document
/// without any is an empty descriptor list.
pub fn descriptors_from_toml(
    content: &str,
    begin: &str,
) -> Result<Vec<ValueDescriptor>, GatherError> {
    let doc: toml::Table = toml::from_str(content)?;
    let list = match doc.get(MANIFEST_KEY) {
        Some(v) => to_json(v),
        None => Value::Array(Vec::new()),
    };
    validate::validate_value(&list, begin)
}

fn to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::from(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        // Not a valid descriptor field type; surfaces as a type violation.
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
    }
}
