//! Small text helpers shared by the handlers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::number_format::{format_bigint, format_number, number_to_string};
use crate::options::Optimizations;
use crate::value::Value;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_$]*$").expect("identifier pattern is valid"));

/// Double-quoted, JSON-escaped string literal.
pub fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Whether `key` can be written as a bare property name.
pub fn is_identifier(key: &str) -> bool {
    IDENTIFIER.is_match(key)
}

/// An object literal key: bare when it is an identifier, quoted otherwise.
pub fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// `JSON.stringify` of a value. `undefined` and functions yield `None`.
pub fn json(value: &Value) -> Option<String> {
    value.to_json().map(|j| j.to_string())
}

/// A value inlined as a call argument when it is a JSON primitive
/// (string, number, boolean or null).
pub fn primitive_literal(value: &Value) -> Option<String> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => json(value),
        _ => None,
    }
}

/// A numeric bound, humanized when symbolic notation is on.
pub fn number_literal(value: f64, optimizations: &Optimizations) -> String {
    if optimizations.scientific_notation {
        format_number(value)
    } else {
        number_to_string(value)
    }
}

/// A bound of unknown kind, rendered the way the host prints it.
pub fn bound_literal(value: &Value, optimizations: &Optimizations) -> String {
    match value {
        Value::Number(n) => number_literal(*n, optimizations),
        Value::BigInt(b) if optimizations.scientific_notation => format_bigint(b),
        Value::BigInt(b) => format!("{b}n"),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        other => json(other).unwrap_or_else(|| "undefined".to_string()),
    }
}
