//! Container schemas: array, object, record, map and set.

use super::{count_field, field, object_field, push_unique, HandlerRegistry, TypeTag};
use crate::checks::normalize_checks;
use crate::error::{Result, SerializeError};
use crate::options::Optimizations;
use crate::render::{bound_literal, property_key};
use crate::serializer::Context;
use crate::value::{Object, Value};

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.insert(TypeTag::Array, array);
    registry.insert(TypeTag::Object, object);
    registry.insert(TypeTag::Record, record);
    registry.insert(TypeTag::Map, map);
    registry.insert(TypeTag::Set, set);
}

/// `.{method}({value})` with the count printed as-is.
fn count_call(method: &str, value: Option<&Value>) -> String {
    let value = value.cloned().unwrap_or_default();
    format!(".{method}({})", bound_literal(&value, &Optimizations::none()))
}

/// Size calls from direct definition fields followed by normalized checks.
///
/// Both encodings can describe the same bound; an identical call is only
/// emitted once, direct fields first.
fn size_calls(def: &Object, direct: &[(&str, &str)], exact_kind: &str) -> Vec<String> {
    let mut calls = Vec::new();

    for (key, method) in direct {
        if let Some(value) = count_field(def, key) {
            push_unique(&mut calls, count_call(method, Some(value)));
        }
    }

    for check in normalize_checks(def) {
        let kind = check.kind.as_str();
        if kind == "min" || kind == "max" || kind == exact_kind {
            push_unique(&mut calls, count_call(kind, check.resolved_value()));
        }
    }

    calls
}

// =========================================================================
// Array / Set
// =========================================================================

fn array(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.array(z.any())".to_string()));
    };

    // v4 names the child `element`; in v3 it is an object-valued `type`
    // (v4 uses `type` for its own tag string).
    let Some(element) = field(def, "element").or_else(|| object_field(def, "type")) else {
        return Ok(Some("z.array(z.any())".to_string()));
    };

    let mut result = format!("z.array({})", ctx.serialize(element)?);
    let direct = [("minLength", "min"), ("maxLength", "max"), ("exactLength", "length")];
    for call in size_calls(def, &direct, "length") {
        result.push_str(&call);
    }

    Ok(Some(result))
}

fn set(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.set(z.any())".to_string()));
    };
    let Some(element) = field(def, "valueType").or_else(|| field(def, "element")) else {
        return Ok(Some("z.set(z.any())".to_string()));
    };

    let mut result = format!("z.set({})", ctx.serialize(element)?);
    let direct = [("minSize", "min"), ("maxSize", "max")];
    for call in size_calls(def, &direct, "size") {
        result.push_str(&call);
    }

    Ok(Some(result))
}

// =========================================================================
// Object
// =========================================================================

/// How an object treats keys outside its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnknownKeys {
    Strip,
    Passthrough,
    Strict,
}

fn object(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.object({})".to_string()));
    };

    // v3 stores the shape behind a thunk.
    let resolved;
    let shape = match def.get("shape") {
        Some(Value::Function(thunk)) => {
            resolved = thunk
                .call(&[])
                .map_err(|e| SerializeError::callback("shape", e.message))?;
            resolved.as_object()
        }
        Some(shape) => shape.as_object(),
        None => None,
    };
    let Some(shape) = shape else {
        return Ok(Some("z.object({})".to_string()));
    };

    let catchall = def.get("catchall").filter(|c| ctx.is_schema(c));
    let catchall_tag = catchall.and_then(|c| ctx.type_tag(c));

    let mut emit_catchall = false;
    let unknown_keys = match def.get("unknownKeys").filter(|v| !matches!(v, Value::Undefined)) {
        // v3: explicit policy, catchall defaults to `never`.
        Some(policy) => {
            emit_catchall = catchall_tag.as_deref().is_some_and(|t| t != "never");
            match policy.as_str() {
                Some("passthrough") => UnknownKeys::Passthrough,
                Some("strict") => UnknownKeys::Strict,
                _ => UnknownKeys::Strip,
            }
        }
        // v4: the catchall type is the policy.
        None => match catchall_tag.as_deref() {
            Some("unknown") => UnknownKeys::Passthrough,
            Some("never") => UnknownKeys::Strict,
            Some(_) => {
                emit_catchall = true;
                UnknownKeys::Strip
            }
            None => UnknownKeys::Strip,
        },
    };

    let mut result = if shape.is_empty() {
        "z.object({})".to_string()
    } else {
        render_shape(shape, ctx)?
    };

    match unknown_keys {
        UnknownKeys::Passthrough => result.push_str(".passthrough()"),
        UnknownKeys::Strict => result.push_str(".strict()"),
        UnknownKeys::Strip => {}
    }

    if let Some(catchall) = catchall.filter(|_| emit_catchall) {
        result.push_str(&format!(".catchall({})", ctx.serialize(catchall)?));
    }

    Ok(Some(result))
}

fn render_shape(shape: &Object, ctx: &Context<'_>) -> Result<String> {
    let level = ctx.indent_level();
    let format = ctx.options().format;

    let mut props = Vec::with_capacity(shape.len());
    for (key, value) in shape {
        let rendered = ctx.serialize_at(value, level + 1)?;
        let pad = if format { ctx.indent(level + 1) } else { String::new() };
        props.push(format!("{pad}{}: {rendered}", property_key(key)));
    }

    Ok(if format {
        format!("z.object({{\n{},\n{}}})", props.join(",\n"), ctx.indent(level))
    } else {
        format!("z.object({{ {} }})", props.join(", "))
    })
}

// =========================================================================
// Record / Map
// =========================================================================

fn record(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let (key, value) = key_value(ctx.def(node), ctx)?;
    Ok(Some(format!("z.record({key}, {value})")))
}

fn map(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let (key, value) = key_value(ctx.def(node), ctx)?;
    Ok(Some(format!("z.map({key}, {value})")))
}

/// Key and value schemas; the key defaults to a string, the value to `any`.
fn key_value(def: Option<&Object>, ctx: &Context<'_>) -> Result<(String, String)> {
    let key = match def.and_then(|d| field(d, "keyType")) {
        Some(key) => ctx.serialize(key)?,
        None => "z.string()".to_string(),
    };
    let value = match def.and_then(|d| field(d, "valueType")) {
        Some(value) => ctx.serialize(value)?,
        None => "z.any()".to_string(),
    };
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use crate::error::SerializeError;
    use crate::options::SerializeOptions;
    use crate::value::{Callable, Value};
    use crate::Serializer;

    fn v3(type_name: &str, fields: Vec<(&str, Value)>) -> Value {
        let mut def = vec![("typeName", Value::from(type_name))];
        def.extend(fields);
        Value::object([("_def", Value::object(def))])
    }

    fn v4(tag: &str, fields: Vec<(&str, Value)>) -> Value {
        let mut def = vec![("type", Value::from(tag))];
        def.extend(fields);
        Value::object([("_zod", Value::object([("def", Value::object(def))]))])
    }

    fn v4_check(fields: Vec<(&str, Value)>) -> Value {
        Value::object([("_zod", Value::object([("def", Value::object(fields))]))])
    }

    fn render_v3(schema: &Value) -> String {
        Serializer::v3().serialize(schema, &SerializeOptions::default()).unwrap()
    }

    fn render_v4(schema: &Value) -> String {
        Serializer::v4().serialize(schema, &SerializeOptions::default()).unwrap()
    }

    fn v3_object(props: Vec<(&str, Value)>) -> Value {
        let shape = Value::object(props);
        v3(
            "ZodObject",
            vec![
                ("shape", Value::thunk(shape)),
                ("unknownKeys", Value::from("strip")),
                ("catchall", v3("ZodNever", vec![])),
            ],
        )
    }

    #[test]
    fn test_v3_array_with_wrapped_lengths() {
        let schema = v3(
            "ZodArray",
            vec![
                ("type", v3("ZodString", vec![])),
                ("minLength", Value::object([("value", Value::from(1)), ("message", Value::Undefined)])),
                ("maxLength", Value::object([("value", Value::from(10))])),
                ("exactLength", Value::Null),
            ],
        );
        assert_eq!(render_v3(&schema), "z.array(z.string()).min(1).max(10)");
    }

    #[test]
    fn test_v4_array_with_checks() {
        let schema = v4(
            "array",
            vec![
                ("element", v4("number", vec![])),
                (
                    "checks",
                    Value::array([
                        v4_check(vec![("check", Value::from("min_length")), ("minimum", Value::from(1))]),
                        v4_check(vec![("check", Value::from("length_equals")), ("length", Value::from(3))]),
                    ]),
                ),
            ],
        );
        assert_eq!(render_v4(&schema), "z.array(z.number()).min(1).length(3)");
    }

    #[test]
    fn test_array_bound_in_both_encodings_renders_once() {
        let schema = v3(
            "ZodArray",
            vec![
                ("type", v3("ZodString", vec![])),
                ("minLength", Value::from(2)),
                (
                    "checks",
                    Value::array([Value::object([
                        ("kind", Value::from("min")),
                        ("value", Value::from(2)),
                    ])]),
                ),
            ],
        );
        assert_eq!(render_v3(&schema), "z.array(z.string()).min(2)");
    }

    #[test]
    fn test_array_without_element() {
        assert_eq!(render_v4(&v4("array", vec![])), "z.array(z.any())");
    }

    #[test]
    fn test_set_sizes() {
        let schema = v3(
            "ZodSet",
            vec![
                ("valueType", v3("ZodString", vec![])),
                ("minSize", Value::object([("value", Value::from(1))])),
                ("maxSize", Value::from(5)),
            ],
        );
        assert_eq!(render_v3(&schema), "z.set(z.string()).min(1).max(5)");
        assert_eq!(render_v3(&v3("ZodSet", vec![])), "z.set(z.any())");
    }

    #[test]
    fn test_empty_object_policies() {
        let base = |policy: &str, catchall: Value| {
            v3(
                "ZodObject",
                vec![
                    ("shape", Value::thunk(Value::object(Vec::<(String, Value)>::new()))),
                    ("unknownKeys", Value::from(policy)),
                    ("catchall", catchall),
                ],
            )
        };
        let never = || v3("ZodNever", vec![]);

        assert_eq!(render_v3(&base("strip", never())), "z.object({})");
        assert_eq!(render_v3(&base("passthrough", never())), "z.object({}).passthrough()");
        assert_eq!(render_v3(&base("strict", never())), "z.object({}).strict()");
        assert_eq!(
            render_v3(&base("strip", v3("ZodString", vec![]))),
            "z.object({}).catchall(z.string())"
        );
    }

    #[test]
    fn test_v4_catchall_policies() {
        let with_catchall = |catchall: Option<Value>| {
            let mut fields = vec![("shape", Value::object([("a", v4("string", vec![]))]))];
            if let Some(catchall) = catchall {
                fields.push(("catchall", catchall));
            }
            Serializer::v4()
                .serialize(&v4("object", fields), &SerializeOptions::compact())
                .unwrap()
        };

        assert_eq!(with_catchall(None), "z.object({ a: z.string() })");
        assert_eq!(
            with_catchall(Some(v4("unknown", vec![]))),
            "z.object({ a: z.string() }).passthrough()"
        );
        assert_eq!(
            with_catchall(Some(v4("never", vec![]))),
            "z.object({ a: z.string() }).strict()"
        );
        assert_eq!(
            with_catchall(Some(v4("number", vec![]))),
            "z.object({ a: z.string() }).catchall(z.number())"
        );
    }

    #[test]
    fn test_object_formatting() {
        let schema = v3_object(vec![
            ("name", v3("ZodString", vec![])),
            ("with-dash", v3("ZodNumber", vec![])),
            ("nested", v3_object(vec![("id", v3("ZodNumber", vec![]))])),
        ]);

        assert_eq!(
            render_v3(&schema),
            "z.object({\n  name: z.string(),\n  \"with-dash\": z.number(),\n  nested: z.object({\n    id: z.number(),\n  }),\n})"
        );

        let compact = Serializer::v3()
            .serialize(&schema, &SerializeOptions::compact())
            .unwrap();
        assert_eq!(
            compact,
            "z.object({ name: z.string(), \"with-dash\": z.number(), nested: z.object({ id: z.number() }) })"
        );
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_object_nested_through_wrapper_keeps_depth() {
        let inner = v3_object(vec![("id", v3("ZodNumber", vec![]))]);
        let schema = v3_object(vec![(
            "meta",
            v3("ZodOptional", vec![("innerType", inner)]),
        )]);

        assert_eq!(
            render_v3(&schema),
            "z.object({\n  meta: z.object({\n    id: z.number(),\n  }).optional(),\n})"
        );
    }

    #[test]
    fn test_object_shape_thunk_failure() {
        let schema = v3(
            "ZodObject",
            vec![("shape", Value::Function(Callable::throwing("boom")))],
        );
        let err = Serializer::v3()
            .serialize(&schema, &SerializeOptions::default())
            .unwrap_err();
        assert_eq!(err, SerializeError::callback("shape", "boom"));
    }

    #[test]
    fn test_record_and_map() {
        let record = v3(
            "ZodRecord",
            vec![
                ("keyType", v3("ZodString", vec![])),
                ("valueType", v3("ZodNumber", vec![])),
            ],
        );
        assert_eq!(render_v3(&record), "z.record(z.string(), z.number())");
        assert_eq!(render_v3(&v3("ZodRecord", vec![])), "z.record(z.string(), z.any())");

        let map = v4(
            "map",
            vec![
                ("keyType", v4("string", vec![])),
                ("valueType", v4("number", vec![])),
            ],
        );
        assert_eq!(render_v4(&map), "z.map(z.string(), z.number())");
        assert_eq!(
            render_v4(&v4("map", vec![("valueType", v4("date", vec![]))])),
            "z.map(z.string(), z.date())"
        );
        assert_eq!(render_v4(&v4("map", vec![])), "z.map(z.string(), z.any())");
    }
}
