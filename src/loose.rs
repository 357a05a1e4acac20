//! Gathering from untyped input.
//!
//! Callers that carry descriptors, environment and argv as JSON data get the
//! shape checks the typed API enforces at compile time: env must be an object
//! of strings, argv an array of strings, options an object with only the
//! known keys.

use serde::Deserialize;
use serde_json::Value;

use crate::error::GatherError;
use crate::output::Gathered;
use crate::resolve::{self, GatherInput};
use crate::types::{DEFAULT_BEGIN, GatherOptions};
use crate::validate;

/// Shape-check every input, then gather. `options` may be `null` for the
/// defaults.
pub fn gather_value(
    descriptors: &Value,
    env: &Value,
    argv: &Value,
    options: &Value,
) -> Result<Gathered, GatherError> {
    let options = options_from_value(options)?;
    let descriptors = validate::validate_value(descriptors, &options.begin)?;
    let env_vars = env_from_value(env, &options.begin)?;
    let argv = argv_from_value(argv, &options.begin)?;

    resolve::gather(GatherInput {
        descriptors,
        env_vars,
        argv,
        options,
    })
}

pub fn options_from_value(value: &Value) -> Result<GatherOptions, GatherError> {
    if value.is_null() {
        return Ok(GatherOptions::default());
    }
    let invalid = |reason: String| GatherError::InvalidInput {
        begin: DEFAULT_BEGIN.to_string(),
        what: "options",
        reason,
    };
    if !value.is_object() {
        return Err(invalid("must be an object".into()));
    }
    GatherOptions::deserialize(value).map_err(|e| invalid(format!("are invalid: {e}")))
}

pub fn env_from_value(value: &Value, begin: &str) -> Result<Vec<(String, String)>, GatherError> {
    let invalid = |reason: String| GatherError::InvalidInput {
        begin: begin.to_string(),
        what: "env",
        reason,
    };
    let Some(map) = value.as_object() else {
        return Err(invalid("must be an object".into()));
    };
    map.iter()
        .map(|(key, v)| match v {
            Value::String(s) => Ok((key.clone(), s.clone())),
            _ => Err(invalid(format!("value for {key:?} must be a string"))),
        })
        .collect()
}

pub fn argv_from_value(value: &Value, begin: &str) -> Result<Vec<String>, GatherError> {
    let invalid = |reason: String| GatherError::InvalidInput {
        begin: begin.to_string(),
        what: "argv",
        reason,
    };
    let Some(items) = value.as_array() else {
        return Err(invalid("must be an array".into()));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| invalid(format!("element {i} must be a string")))
        })
        .collect()
}
