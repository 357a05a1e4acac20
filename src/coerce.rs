//! Coerce raw argv/env input into a typed [`ConfigValue`].

use crate::argv::ArgValue;
use crate::types::{ConfigValue, Kind};

/// Coerce a raw source value according to `kind`.
///
/// `ArgValue::Bare` is the flag-with-no-value case from argv; env values are
/// always `ArgValue::Value`. Returns the reason on failure, which the resolver
/// turns into a warning.
pub fn coerce(kind: Kind, raw: &ArgValue) -> Result<ConfigValue, String> {
    match (kind, raw) {
        (Kind::Boolean, ArgValue::Bare) => Ok(ConfigValue::Bool(true)),
        (Kind::Boolean, ArgValue::Value(s)) => parse_bool(s)
            .map(ConfigValue::Bool)
            .ok_or_else(|| "expected \"true\" or \"false\"".to_string()),
        (Kind::Number, ArgValue::Bare) => Err("expected a number, got no value".to_string()),
        (Kind::Number, ArgValue::Value(s)) => parse_number(s)
            .map(ConfigValue::Number)
            .ok_or_else(|| "expected a number".to_string()),
        // Strings pass through untouched, including a bare flag's `true`.
        (Kind::String, ArgValue::Bare) => Ok(ConfigValue::Bool(true)),
        (Kind::String, ArgValue::Value(s)) => Ok(ConfigValue::String(s.clone())),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse `[-]literal` where literal is `0b…`, `0o…`, `0x…` or a finite decimal.
///
/// Prefixes are lowercase only (`0X1A` is not a number). Prefixed literals of
/// any length are accepted and rounded to the nearest `f64`; a decimal that
/// overflows to infinity, such as `1e400`, is rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = parse_unsigned(body)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_unsigned(s: &str) -> Option<f64> {
    for (prefix, radix) in [("0b", 2), ("0o", 8), ("0x", 16)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return digits
                .chars()
                .try_fold(0.0, |acc: f64, c| {
                    Some(acc * f64::from(radix) + f64::from(c.to_digit(radix)?))
                })
                .filter(|f| f.is_finite());
        }
    }
    // Rust's float grammar also takes signs, "inf" and "NaN"; none of those
    // are number literals here.
    if !s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}
