//! Constraint normalization.
//!
//! Zod v3 stores constraints as a flat list of `{ kind, value, inclusive,
//! regex }` objects. Zod v4 wraps each check as `{ _zod: { def: { check, ... } } }`
//! and encodes strict versus inclusive bounds in the check name. Both are
//! normalized into a uniform, ordered list of [`Check`] descriptors.

use crate::value::{Object, Value};

/// A normalized constraint.
///
/// Descriptors are created fresh for every normalization and never mutated
/// afterwards. Order matches declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Check {
    /// Constraint kind (`min`, `max`, `length`, `int`, `email`, ...).
    ///
    /// Kinds the normalizer does not know pass through under their raw name.
    pub kind: String,
    /// The single value this check carries, if any.
    pub value: Option<Value>,
    /// Lower bound, for bound-style checks.
    pub minimum: Option<Value>,
    /// Upper bound, for bound-style checks.
    pub maximum: Option<Value>,
    /// Whether the bound is inclusive.
    pub inclusive: Option<bool>,
    /// Regular expression attached to the check.
    pub pattern: Option<Value>,
}

impl Check {
    /// Create a check of the given kind with no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// The value the check carries: `value`, else `minimum`, else `maximum`.
    pub fn resolved_value(&self) -> Option<&Value> {
        self.value
            .as_ref()
            .or(self.minimum.as_ref())
            .or(self.maximum.as_ref())
    }
}

/// Normalize the `checks` list of a raw definition.
///
/// Returns an empty list when the definition carries no check list. Entries
/// that are neither v3 nor v4 shaped are skipped.
pub fn normalize_checks(def: &Object) -> Vec<Check> {
    let Some(checks) = def.get("checks").and_then(Value::as_array) else {
        return Vec::new();
    };

    checks.iter().filter_map(normalize_check).collect()
}

fn normalize_check(raw: &Value) -> Option<Check> {
    let check = raw.as_object()?;

    if let Some(kind) = check.get("kind").and_then(Value::as_str) {
        return Some(normalize_v3(kind, check));
    }

    let def = raw.get("_zod")?.get("def")?.as_object()?;
    let name = def.get("check")?.as_str()?;
    Some(normalize_v4(name, def))
}

fn normalize_v3(kind: &str, check: &Object) -> Check {
    let value = present(check, "value");
    Check {
        kind: kind.to_string(),
        minimum: value.clone(),
        maximum: value.clone(),
        value,
        inclusive: check.get("inclusive").and_then(Value::as_bool),
        pattern: present(check, "regex"),
    }
}

fn normalize_v4(name: &str, def: &Object) -> Check {
    match name {
        "string_format" => {
            let format = def
                .get("format")
                .and_then(Value::as_str)
                .filter(|f| !f.is_empty())
                .unwrap_or("format");
            Check {
                kind: format_kind(format).to_string(),
                // starts_with / ends_with / includes carry their operand here
                value: ["prefix", "suffix", "includes"]
                    .iter()
                    .find_map(|key| present(def, key)),
                pattern: present(def, "pattern"),
                ..Check::default()
            }
        }
        "number_format" => {
            let format = def.get("format").and_then(Value::as_str).unwrap_or("");
            let kind = match format {
                "int" | "safeint" | "integer" | "" => "int",
                other => other,
            };
            Check::new(kind)
        }
        _ => {
            let inclusive = match name {
                "greater_than" | "less_than" => Some(false),
                "greater_than_or_equal" | "less_than_or_equal" => Some(true),
                _ => def.get("inclusive").and_then(Value::as_bool),
            };
            let minimum = present(def, "minimum");
            let maximum = present(def, "maximum");
            Check {
                kind: v4_kind(name).to_string(),
                value: present(def, "value")
                    .or_else(|| minimum.clone())
                    .or_else(|| maximum.clone())
                    .or_else(|| present(def, "length"))
                    .or_else(|| present(def, "size")),
                minimum,
                maximum,
                inclusive,
                pattern: present(def, "pattern"),
            }
        }
    }
}

/// Translate a v4 check name into the shared kind vocabulary.
fn v4_kind(name: &str) -> &str {
    match name {
        "min_length" | "min_size" | "greater_than" | "greater_than_or_equal" => "min",
        "max_length" | "max_size" | "less_than" | "less_than_or_equal" => "max",
        "length_equals" => "length",
        "size_equals" => "size",
        "to_lower_case" => "toLowerCase",
        "to_upper_case" => "toUpperCase",
        "starts_with" => "startsWith",
        "ends_with" => "endsWith",
        "multiple_of" => "multipleOf",
        "pattern" => "regex",
        "integer" => "int",
        other => other,
    }
}

/// The kind of a v4 `string_format` check: the format name itself.
///
/// Only the operand formats are respelled; `lowercase`, `ipv4` and the like
/// are not the v3 `toLowerCase` / `ip` kinds and keep their own name.
fn format_kind(format: &str) -> &str {
    match format {
        "starts_with" => "startsWith",
        "ends_with" => "endsWith",
        other => other,
    }
}

/// A field's value unless it is `undefined` or `null`.
fn present(object: &Object, key: &str) -> Option<Value> {
    object.get(key).filter(|v| !v.is_nullish()).cloned()
}
