//! Scalar schemas: bare constructors plus the constraint chains of
//! string, number, bigint and date.

use chrono::{DateTime, Utc};
use num_traits::Zero;

use super::{HandlerRegistry, TypeTag};
use crate::checks::{normalize_checks, Check};
use crate::error::{Result, SerializeError};
use crate::number_format::{format_bigint, number_to_string, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER};
use crate::options::Optimizations;
use crate::render::{bound_literal, json, quote};
use crate::serializer::Context;
use crate::value::{date_from_millis, iso_string, Object, Value};

/// Primitives that never carry configuration.
const BARE: &[&str] = &["undefined", "null", "void", "any", "unknown", "never", "nan", "symbol"];

/// String methods that take no argument and map one-to-one from a kind.
const STRING_FLAGS: &[&str] = &[
    "email",
    "url",
    "uuid",
    "cuid",
    "cuid2",
    "ulid",
    "nanoid",
    "emoji",
    "base64",
    "base64url",
    "jwt",
    "datetime",
    "date",
    "time",
    "duration",
    "ip",
    "cidr",
    "trim",
    "toLowerCase",
    "toUpperCase",
];

/// Number methods that take no argument.
const NUMBER_FLAGS: &[&str] = &[
    "int",
    "finite",
    "safe",
    "positive",
    "negative",
    "nonnegative",
    "nonpositive",
];

pub(super) fn register(registry: &mut HandlerRegistry) {
    for tag in BARE {
        let rendered = format!("z.{tag}()");
        registry.insert(*tag, move |_, _| Ok(Some(rendered.clone())));
    }

    registry.insert(TypeTag::Boolean, boolean);
    registry.insert(TypeTag::String, string);
    registry.insert(TypeTag::Number, number);
    registry.insert(TypeTag::BigInt, bigint);
    registry.insert(TypeTag::Date, date);
}

/// `z.<name>()`, or `z.coerce.<name>()` when the coercion flag is set.
fn constructor(def: &Object, name: &str) -> String {
    if def.get("coerce").is_some_and(Value::is_truthy) {
        format!("z.coerce.{name}()")
    } else {
        format!("z.{name}()")
    }
}

/// A length-style argument, printed without humanizing.
fn plain(value: Option<&Value>) -> String {
    bound_literal(value.unwrap_or(&Value::Undefined), &Optimizations::none())
}

fn boolean(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    Ok(Some(match ctx.def(node) {
        Some(def) => constructor(def, "boolean"),
        None => "z.boolean()".to_string(),
    }))
}

// =========================================================================
// String
// =========================================================================

fn string(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.string()".to_string()));
    };

    let mut result = constructor(def, "string");
    for check in normalize_checks(def) {
        let kind = check.kind.as_str();
        let value = check.resolved_value();
        match kind {
            "min" | "max" | "length" => {
                result.push_str(&format!(".{kind}({})", plain(value)));
            }
            "regex" => {
                if let Some(Value::RegExp(re)) = check.pattern.as_ref().or(check.value.as_ref()) {
                    result.push_str(&format!(".regex({re})"));
                }
            }
            "startsWith" | "endsWith" | "includes" => {
                let arg = value.and_then(json).unwrap_or_else(|| "undefined".to_string());
                result.push_str(&format!(".{kind}({arg})"));
            }
            _ if STRING_FLAGS.contains(&kind) => {
                result.push_str(&format!(".{kind}()"));
            }
            _ => {}
        }
    }

    Ok(Some(result))
}

// =========================================================================
// Number
// =========================================================================

fn number(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.number()".to_string()));
    };

    let optimizations = ctx.optimizations();
    let semantic = optimizations.semantic_methods;
    let checks = normalize_checks(def);
    let mut result = constructor(def, "number");

    for (index, check) in checks.iter().enumerate() {
        let value = check.resolved_value();
        let n = value.and_then(Value::as_f64);
        let literal = || bound_literal(value.unwrap_or(&Value::Undefined), optimizations);

        let call = match check.kind.as_str() {
            "min" => match (n, check.inclusive) {
                (Some(z), Some(false)) if semantic && z == 0.0 => "positive()".to_string(),
                (Some(z), Some(true)) if semantic && z == 0.0 => "nonnegative()".to_string(),
                _ => format!("min({})", literal()),
            },
            "max" => match (n, check.inclusive) {
                (Some(z), Some(false)) if semantic && z == 0.0 => "negative()".to_string(),
                (Some(z), Some(true)) if semantic && z == 0.0 => "nonpositive()".to_string(),
                (Some(m), Some(true))
                    if semantic
                        && m == MAX_SAFE_INTEGER
                        && checks[..index].iter().any(is_min_safe) =>
                {
                    "safe()".to_string()
                }
                _ => format!("max({})", literal()),
            },
            "multipleOf" => format!("multipleOf({})", literal()),
            kind if NUMBER_FLAGS.contains(&kind) => format!("{kind}()"),
            _ => continue,
        };

        result.push('.');
        result.push_str(&call);
    }

    Ok(Some(result))
}

/// An inclusive lower bound at `Number.MIN_SAFE_INTEGER`.
fn is_min_safe(check: &Check) -> bool {
    check.kind == "min"
        && check.inclusive == Some(true)
        && check.resolved_value().and_then(Value::as_f64) == Some(MIN_SAFE_INTEGER)
}

// =========================================================================
// BigInt
// =========================================================================

fn bigint(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.bigint()".to_string()));
    };

    let optimizations = ctx.optimizations();
    let semantic = optimizations.semantic_methods;
    let mut result = constructor(def, "bigint");

    for check in normalize_checks(def) {
        let value = check.resolved_value();
        let zero = value.and_then(Value::as_bigint).is_some_and(Zero::is_zero);
        let literal = || bigint_literal(value, optimizations);

        let call = match (check.kind.as_str(), check.inclusive) {
            ("min", Some(false)) if semantic && zero => "positive()".to_string(),
            ("min", Some(true)) if semantic && zero => "nonnegative()".to_string(),
            ("min", _) => format!("min({})", literal()),
            ("max", Some(false)) if semantic && zero => "negative()".to_string(),
            ("max", Some(true)) if semantic && zero => "nonpositive()".to_string(),
            ("max", _) => format!("max({})", literal()),
            ("multipleOf", _) => format!("multipleOf({})", literal()),
            (kind @ ("positive" | "negative" | "nonnegative" | "nonpositive"), _) => {
                format!("{kind}()")
            }
            _ => continue,
        };

        result.push('.');
        result.push_str(&call);
    }

    Ok(Some(result))
}

/// A big integer literal with its `n` suffix.
fn bigint_literal(value: Option<&Value>, optimizations: &Optimizations) -> String {
    match value {
        Some(Value::BigInt(b)) if optimizations.scientific_notation => format_bigint(b),
        Some(Value::BigInt(b)) => format!("{b}n"),
        Some(Value::Number(n)) => format!("{}n", number_to_string(*n)),
        Some(other) => bound_literal(other, optimizations),
        None => "undefinedn".to_string(),
    }
}

// =========================================================================
// Date
// =========================================================================

fn date(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.date()".to_string()));
    };

    let mut result = constructor(def, "date");
    for check in normalize_checks(def) {
        let kind = check.kind.as_str();
        if kind == "min" || kind == "max" {
            let iso = date_iso(check.resolved_value())?;
            result.push_str(&format!(".{kind}(new Date({}))", quote(&iso)));
        }
    }

    Ok(Some(result))
}

/// The ISO-8601 form of a date bound; bare numbers are epoch milliseconds.
fn date_iso(value: Option<&Value>) -> Result<String> {
    match value {
        Some(Value::Date(d)) => Ok(iso_string(d)),
        Some(Value::Number(ms)) => date_from_millis(*ms)
            .map(|d| iso_string(&d))
            .ok_or_else(|| SerializeError::invalid_date(number_to_string(*ms))),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|d| iso_string(&d.with_timezone(&Utc)))
            .map_err(|_| SerializeError::invalid_date(s.clone())),
        Some(other) => Err(SerializeError::invalid_date(other.type_of())),
        None => Err(SerializeError::invalid_date("undefined")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SerializeOptions;
    use crate::Serializer;
    use num_bigint::BigInt;

    fn v3(type_name: &str, fields: Vec<(&str, Value)>) -> Value {
        let mut def = vec![("typeName", Value::from(type_name))];
        def.extend(fields);
        Value::object([("_def", Value::object(def))])
    }

    fn check(kind: &str, value: Value, inclusive: Option<bool>) -> Value {
        let mut fields = vec![("kind", Value::from(kind)), ("value", value)];
        if let Some(inclusive) = inclusive {
            fields.push(("inclusive", Value::from(inclusive)));
        }
        Value::object(fields)
    }

    fn checks(items: Vec<Value>) -> Vec<(&'static str, Value)> {
        vec![("checks", Value::Array(items))]
    }

    fn render(schema: &Value) -> String {
        Serializer::v3().serialize(schema, &SerializeOptions::default()).unwrap()
    }

    fn render_with(schema: &Value, optimizations: Optimizations) -> String {
        let opts = SerializeOptions::default().with_optimizations(optimizations);
        Serializer::v3().serialize(schema, &opts).unwrap()
    }

    #[test]
    fn test_bare_primitives() {
        for (type_name, expected) in [
            ("ZodUndefined", "z.undefined()"),
            ("ZodNull", "z.null()"),
            ("ZodVoid", "z.void()"),
            ("ZodAny", "z.any()"),
            ("ZodUnknown", "z.unknown()"),
            ("ZodNever", "z.never()"),
            ("ZodNaN", "z.nan()"),
            ("ZodSymbol", "z.symbol()"),
        ] {
            assert_eq!(render(&v3(type_name, vec![])), expected);
        }
    }

    #[test]
    fn test_coercion_variants() {
        let coerce = || vec![("coerce", Value::from(true))];
        assert_eq!(render(&v3("ZodString", coerce())), "z.coerce.string()");
        assert_eq!(render(&v3("ZodNumber", coerce())), "z.coerce.number()");
        assert_eq!(render(&v3("ZodBoolean", coerce())), "z.coerce.boolean()");
        assert_eq!(render(&v3("ZodBigInt", coerce())), "z.coerce.bigint()");
        assert_eq!(render(&v3("ZodDate", coerce())), "z.coerce.date()");
        assert_eq!(
            render(&v3("ZodBoolean", vec![("coerce", Value::from(false))])),
            "z.boolean()"
        );
    }

    #[test]
    fn test_string_constraints_in_order() {
        let schema = v3(
            "ZodString",
            checks(vec![
                check("min", Value::from(3), None),
                check("max", Value::from(255), None),
                Value::object([("kind", Value::from("email"))]),
                Value::object([("kind", Value::from("trim"))]),
            ]),
        );
        assert_eq!(render(&schema), "z.string().min(3).max(255).email().trim()");
    }

    #[test]
    fn test_string_operands_and_regex() {
        let schema = v3(
            "ZodString",
            checks(vec![
                check("startsWith", Value::from("say \"hi\""), None),
                check("endsWith", Value::from("!"), None),
                Value::object([
                    ("kind", Value::from("regex")),
                    ("regex", Value::regex("^[a-z]+$", "i")),
                ]),
            ]),
        );
        assert_eq!(
            render(&schema),
            r#"z.string().startsWith("say \"hi\"").endsWith("!").regex(/^[a-z]+$/i)"#
        );
    }

    #[test]
    fn test_string_skips_unknown_kinds() {
        let schema = v3(
            "ZodString",
            checks(vec![
                Value::object([("kind", Value::from("somethingNew"))]),
                Value::object([("kind", Value::from("uuid"))]),
            ]),
        );
        assert_eq!(render(&schema), "z.string().uuid()");
    }

    #[test]
    fn test_number_semantic_recovery() {
        let positive = v3(
            "ZodNumber",
            checks(vec![check("min", Value::from(0), Some(false))]),
        );
        let nonnegative = v3(
            "ZodNumber",
            checks(vec![check("min", Value::from(0), Some(true))]),
        );
        let negative = v3(
            "ZodNumber",
            checks(vec![check("max", Value::from(0), Some(false))]),
        );
        let nonpositive = v3(
            "ZodNumber",
            checks(vec![check("max", Value::from(0), Some(true))]),
        );

        assert_eq!(render(&positive), "z.number().positive()");
        assert_eq!(render(&nonnegative), "z.number().nonnegative()");
        assert_eq!(render(&negative), "z.number().negative()");
        assert_eq!(render(&nonpositive), "z.number().nonpositive()");
    }

    #[test]
    fn test_number_safe_replaces_paired_max() {
        let schema = v3(
            "ZodNumber",
            checks(vec![
                Value::object([("kind", Value::from("int"))]),
                check("min", Value::from(MIN_SAFE_INTEGER), Some(true)),
                check("max", Value::from(MAX_SAFE_INTEGER), Some(true)),
            ]),
        );
        let rendered = render(&schema);
        assert_eq!(rendered, "z.number().int().min(Number.MIN_SAFE_INTEGER).safe()");
        assert!(!rendered.contains(".max("));
    }

    #[test]
    fn test_number_max_safe_without_prior_min_stays_literal() {
        let schema = v3(
            "ZodNumber",
            checks(vec![
                check("max", Value::from(MAX_SAFE_INTEGER), Some(true)),
                check("min", Value::from(MIN_SAFE_INTEGER), Some(true)),
            ]),
        );
        assert_eq!(
            render(&schema),
            "z.number().max(Number.MAX_SAFE_INTEGER).min(Number.MIN_SAFE_INTEGER)"
        );
    }

    #[test]
    fn test_number_literals_are_humanized() {
        let schema = v3(
            "ZodNumber",
            checks(vec![
                Value::object([("kind", Value::from("int"))]),
                check("min", Value::from(-2147483648i64), Some(true)),
                check("max", Value::from(2147483647i64), Some(true)),
                check("multipleOf", Value::from(256), None),
            ]),
        );
        assert_eq!(
            render(&schema),
            "z.number().int().min(-2**31).max(2**31 - 1).multipleOf(2**8)"
        );
    }

    #[test]
    fn test_number_optimizations_disabled() {
        let schema = v3(
            "ZodNumber",
            checks(vec![
                check("min", Value::from(0), Some(false)),
                check("max", Value::from(65535), Some(true)),
            ]),
        );
        assert_eq!(
            render_with(&schema, Optimizations::none()),
            "z.number().min(0).max(65535)"
        );
        assert_eq!(
            render_with(
                &schema,
                Optimizations {
                    semantic_methods: true,
                    scientific_notation: false,
                }
            ),
            "z.number().positive().max(65535)"
        );
    }

    #[test]
    fn test_number_int_ignores_semantic_flag() {
        let schema = v3(
            "ZodNumber",
            checks(vec![
                Value::object([("kind", Value::from("int"))]),
                check("min", Value::from(0), Some(true)),
            ]),
        );
        assert_eq!(
            render_with(&schema, Optimizations::none()),
            "z.number().int().min(0)"
        );
        assert_eq!(render(&schema), "z.number().int().nonnegative()");
    }

    #[test]
    fn test_number_never_guesses_meaning() {
        let ranges = [(0, 100), (100, 599), (0, 65535)];
        for (min, max) in ranges {
            let schema = v3(
                "ZodNumber",
                checks(vec![
                    Value::object([("kind", Value::from("int"))]),
                    check("min", Value::from(min), Some(true)),
                    check("max", Value::from(max), Some(true)),
                ]),
            );
            let rendered = render(&schema);
            for word in ["PERCENTAGE", "HTTP", "STATUS", "PORT"] {
                assert!(!rendered.contains(word), "{rendered} contains {word}");
            }
        }
    }

    #[test]
    fn test_bigint_constraints() {
        let schema = v3(
            "ZodBigInt",
            checks(vec![
                check("min", Value::bigint(0), Some(false)),
                check("max", Value::bigint(i64::MAX), Some(true)),
                check("multipleOf", Value::bigint(10), None),
            ]),
        );
        assert_eq!(
            render(&schema),
            "z.bigint().positive().max(2n**63n - 1n).multipleOf(10n)"
        );
        assert_eq!(
            render_with(&schema, Optimizations::none()),
            "z.bigint().min(0n).max(9223372036854775807n).multipleOf(10n)"
        );
    }

    #[test]
    fn test_bigint_negative_powers() {
        let schema = v3(
            "ZodBigInt",
            checks(vec![check("min", Value::bigint(BigInt::from(-65536)), Some(true))]),
        );
        assert_eq!(render(&schema), "z.bigint().min(-2n**16n)");
    }

    #[test]
    fn test_date_bounds() {
        let start = date_from_millis(0.0).unwrap();
        let schema = v3(
            "ZodDate",
            checks(vec![
                check("min", Value::Date(start), None),
                check("max", Value::from(86_400_000), None),
            ]),
        );
        assert_eq!(
            render(&schema),
            r#"z.date().min(new Date("1970-01-01T00:00:00.000Z")).max(new Date("1970-01-02T00:00:00.000Z"))"#
        );
    }

    #[test]
    fn test_invalid_date_bound_is_an_error() {
        let schema = v3(
            "ZodDate",
            checks(vec![check("min", Value::from(f64::NAN), None)]),
        );
        let err = Serializer::v3()
            .serialize(&schema, &SerializeOptions::default())
            .unwrap_err();
        assert!(matches!(err, SerializeError::InvalidDate { .. }));
    }
}
