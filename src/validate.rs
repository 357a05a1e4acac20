//! Descriptor validation: shape, naming rules and cross-descriptor collisions.
//!
//! Checks run in stages. A stage runs only when every earlier stage came back
//! clean; within a stage, every violation is collected:
//!
//! 1. The input is a list of objects (loose input only).
//! 2. Each descriptor's fields have the right types and names match their
//!    patterns. Loose input also rejects unknown fields, found with
//!    `serde_ignored` while deserializing.
//! 3. Each descriptor has at least one possible source.
//! 4. No two descriptors share a long name, short name, env name or returned
//!    name. The four namespaces are independent.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::argv::{is_long_name, is_short_name};
use crate::error::GatherError;
use crate::types::{ValueDescriptor, label};

/// Label used when validation is called directly.
pub const VALIDATE_BEGIN: &str = "validate_descriptors()";

const MAX_NAME_LEN: usize = 32;
const MAX_NOTE_LEN: usize = 64;

const KNOWN_FIELDS: [&str; 7] = [
    "kind",
    "fallback",
    "nameArgvLong",
    "nameArgvShort",
    "nameEnv",
    "nameReturned",
    "note",
];

/// Validate typed descriptors (stages 2-4).
pub fn validate_descriptors(
    descriptors: &[ValueDescriptor],
    begin: &str,
) -> Result<(), GatherError> {
    let prefix = label(begin);

    let violations: Vec<String> = descriptors
        .iter()
        .enumerate()
        .flat_map(|(i, d)| field_violations(&prefix, i, d))
        .collect();
    finish(violations)?;

    check_sources(&prefix, descriptors)?;
    check_unique(&prefix, descriptors)
}

/// Validate untyped descriptors (stages 1-4) and return them typed.
///
/// For descriptor lists that arrive as data, e.g. parsed from JSON, rather
/// than built in code.
pub fn validate_value(value: &Value, begin: &str) -> Result<Vec<ValueDescriptor>, GatherError> {
    let prefix = label(begin);

    // 1: a list of objects
    let Some(elements) = value.as_array() else {
        return Err(GatherError::InvalidDescriptors {
            violations: vec![format!("{prefix}descriptors must be an array")],
        });
    };
    let mut objects = Vec::with_capacity(elements.len());
    let mut violations = Vec::new();
    for (i, element) in elements.iter().enumerate() {
        match element.as_object() {
            Some(obj) => objects.push(obj),
            None => violations.push(format!("{prefix}descriptors[{i}] must be an object")),
        }
    }
    finish(violations)?;

    // 2: field types, unknown fields, then naming rules
    let mut descriptors = Vec::with_capacity(objects.len());
    let mut violations = Vec::new();
    for (i, obj) in objects.into_iter().enumerate() {
        let type_errors = type_violations(&prefix, i, obj);
        if !type_errors.is_empty() {
            violations.extend(type_errors);
            continue;
        }
        match deserialize_strict(&prefix, i, &elements[i]) {
            Ok(d) => {
                violations.extend(field_violations(&prefix, i, &d));
                descriptors.push(d);
            }
            Err(errs) => violations.extend(errs),
        }
    }
    finish(violations)?;

    check_sources(&prefix, &descriptors)?;
    check_unique(&prefix, &descriptors)?;
    Ok(descriptors)
}

fn finish(violations: Vec<String>) -> Result<(), GatherError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(GatherError::InvalidDescriptors { violations })
    }
}

fn type_violations(prefix: &str, i: usize, obj: &Map<String, Value>) -> Vec<String> {
    let mut out = Vec::new();
    let at = |field: &str| format!("{prefix}descriptors[{i}].{field}");

    match obj.get("kind") {
        None => out.push(format!("{} is required", at("kind"))),
        Some(Value::String(k)) if matches!(k.as_str(), "boolean" | "number" | "string") => {}
        Some(_) => out.push(format!(
            "{} must be one of \"boolean\", \"number\", \"string\"",
            at("kind")
        )),
    }

    match obj.get("nameReturned") {
        None => out.push(format!("{} is required", at("nameReturned"))),
        Some(Value::String(_)) => {}
        Some(_) => out.push(format!("{} must be a string", at("nameReturned"))),
    }

    if let Some(fallback) = obj.get("fallback")
        && !matches!(fallback, Value::Bool(_) | Value::Number(_) | Value::String(_))
    {
        out.push(format!(
            "{} must be a boolean, number or string",
            at("fallback")
        ));
    }

    for field in ["nameArgvLong", "nameEnv", "note"] {
        if let Some(v) = obj.get(field)
            && !v.is_string()
        {
            out.push(format!("{} must be a string", at(field)));
        }
    }

    match obj.get("nameArgvShort") {
        None => {}
        Some(Value::String(s)) if s.chars().count() == 1 => {}
        Some(_) => out.push(format!(
            "{} must be a single-character string",
            at("nameArgvShort")
        )),
    }

    out
}

/// Deserialize one descriptor, reporting any fields it does not consume.
fn deserialize_strict(
    prefix: &str,
    i: usize,
    value: &Value,
) -> Result<ValueDescriptor, Vec<String>> {
    let mut unknown: Vec<String> = Vec::new();
    let descriptor: ValueDescriptor = serde_ignored::deserialize(value, |path| {
        unknown.push(path.to_string());
    })
    .map_err(|e| vec![format!("{prefix}descriptors[{i}]: {e}")])?;

    if unknown.is_empty() {
        return Ok(descriptor);
    }
    Err(unknown
        .into_iter()
        .map(|field| {
            format!(
                "{prefix}descriptors[{i}].{field} is not a known field (expected one of {})",
                KNOWN_FIELDS.join(", ")
            )
        })
        .collect())
}

fn field_violations(prefix: &str, i: usize, d: &ValueDescriptor) -> Vec<String> {
    let mut out = Vec::new();
    let at = |field: &str| format!("{prefix}descriptors[{i}].{field}");

    if let Some(long) = &d.name_argv_long
        && !(long.len() <= MAX_NAME_LEN && is_long_name(long))
    {
        out.push(format!(
            "{} {long:?} must be a lowercase letter followed by 1-{} of [a-z0-9-]",
            at("nameArgvLong"),
            MAX_NAME_LEN - 1
        ));
    }

    if let Some(short) = d.name_argv_short
        && !is_short_name(short)
    {
        out.push(format!(
            "{} {short:?} must be an ASCII letter or '?'",
            at("nameArgvShort")
        ));
    }

    if let Some(env) = &d.name_env
        && !is_env_name(env)
    {
        out.push(format!(
            "{} {env:?} must be an uppercase letter followed by up to {} of [A-Z0-9_]",
            at("nameEnv"),
            MAX_NAME_LEN - 1
        ));
    }

    if !is_returned_name(&d.name_returned) {
        out.push(format!(
            "{} {:?} must be a letter or '_' followed by up to {} of [A-Za-z0-9_]",
            at("nameReturned"),
            d.name_returned,
            MAX_NAME_LEN - 1
        ));
    }

    if let Some(note) = &d.note
        && !is_note(note)
    {
        out.push(format!(
            "{} must be 1-{MAX_NOTE_LEN} printable ASCII characters, without backslashes",
            at("note")
        ));
    }

    out
}

fn is_env_name(s: &str) -> bool {
    let mut chars = s.chars();
    s.len() <= MAX_NAME_LEN
        && matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn is_returned_name(s: &str) -> bool {
    let mut chars = s.chars();
    s.len() <= MAX_NAME_LEN
        && matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_note(s: &str) -> bool {
    (1..=MAX_NOTE_LEN).contains(&s.len()) && s.chars().all(|c| matches!(c, ' '..='~') && c != '\\')
}

fn check_sources(prefix: &str, descriptors: &[ValueDescriptor]) -> Result<(), GatherError> {
    let violations = descriptors
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.has_possible_value())
        .map(|(i, _)| {
            format!(
                "{prefix}descriptors[{i}] has no possible value: set at least one of fallback, nameArgvLong, nameArgvShort, nameEnv"
            )
        })
        .collect();
    finish(violations)
}

fn check_unique(prefix: &str, descriptors: &[ValueDescriptor]) -> Result<(), GatherError> {
    type Key = fn(&ValueDescriptor) -> Option<String>;
    let namespaces: [(&str, Key); 4] = [
        ("nameArgvLong", |d| d.name_argv_long.clone()),
        ("nameArgvShort", |d| d.name_argv_short.map(String::from)),
        ("nameEnv", |d| d.name_env.clone()),
        ("nameReturned", |d| Some(d.name_returned.clone())),
    ];

    let mut violations = Vec::new();
    for (field, key) in namespaces {
        let mut owners: HashMap<String, usize> = HashMap::new();
        for (i, d) in descriptors.iter().enumerate() {
            let Some(name) = key(d) else {
                continue;
            };
            match owners.get(&name) {
                Some(&owner) => violations.push(format!(
                    "{prefix}descriptors[{i}].{field} {name:?} is already used by descriptors[{owner}]"
                )),
                None => {
                    owners.insert(name, i);
                }
            }
        }
    }
    finish(violations)
}
