//! Builders for schema object graphs shaped like Zod's runtime internals.

#![allow(dead_code)]

use zod_codepen::Value;

/// A Zod 3 schema: `{ _def: { typeName, ...fields } }`.
pub fn v3(type_name: &str, fields: Vec<(&str, Value)>) -> Value {
    let mut def = vec![("typeName", Value::from(type_name))];
    def.extend(fields);
    Value::object([("_def", Value::object(def))])
}

/// A Zod 3 check: `{ kind, value, inclusive }`.
pub fn v3_check(kind: &str, value: impl Into<Value>, inclusive: bool) -> Value {
    Value::object([
        ("kind", Value::from(kind)),
        ("value", value.into()),
        ("inclusive", Value::from(inclusive)),
    ])
}

/// A Zod 3 check without payload.
pub fn v3_flag(kind: &str) -> Value {
    Value::object([("kind", Value::from(kind))])
}

/// A Zod 4 schema: `{ _zod: { def: { type, ...fields } } }`.
pub fn v4(tag: &str, fields: Vec<(&str, Value)>) -> Value {
    let mut def = vec![("type", Value::from(tag))];
    def.extend(fields);
    Value::object([("_zod", Value::object([("def", Value::object(def))]))])
}

/// A Zod 4 check: `{ _zod: { def: { check, ...fields } } }`.
pub fn v4_check(check: &str, fields: Vec<(&str, Value)>) -> Value {
    let mut def = vec![("check", Value::from(check))];
    def.extend(fields);
    Value::object([("_zod", Value::object([("def", Value::object(def))]))])
}

/// A v3 object schema with a lazily resolved shape.
pub fn v3_object(shape: Vec<(&str, Value)>) -> Value {
    v3(
        "ZodObject",
        vec![
            ("shape", Value::thunk(Value::object(shape))),
            ("unknownKeys", Value::from("strip")),
            ("catchall", v3("ZodNever", vec![])),
        ],
    )
}

/// A v4 object schema.
pub fn v4_object(shape: Vec<(&str, Value)>) -> Value {
    v4("object", vec![("shape", Value::object(shape))])
}
