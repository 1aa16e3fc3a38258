//! Literal, enum and native enum schemas.

use super::{HandlerRegistry, TypeTag};
use crate::error::Result;
use crate::number_format::number_to_string;
use crate::render::{json, quote};
use crate::serializer::Context;
use crate::value::{Value, UNDEFINED};

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.insert(TypeTag::Literal, literal);
    registry.insert(TypeTag::Enum, enumeration);
    registry.insert(TypeTag::NativeEnum, native_enum);
}

fn literal(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);

    // v3 keeps a single `value`, v4 a one-element `values` array.
    let value = def
        .and_then(|d| d.get("value"))
        .filter(|v| !matches!(v, Value::Undefined))
        .or_else(|| {
            def.and_then(|d| d.get("values"))
                .and_then(Value::as_array)
                .and_then(<[Value]>::first)
        })
        .unwrap_or(&UNDEFINED);

    let rendered = match value {
        Value::String(s) => quote(s),
        Value::Number(n) => number_to_string(*n),
        Value::Bool(b) => b.to_string(),
        Value::BigInt(b) => format!("{b}n"),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        other => json(other).unwrap_or_else(|| "undefined".to_string()),
    };

    Ok(Some(format!("z.literal({rendered})")))
}

fn enumeration(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);

    // v3 stores the options as an array, v4 as an `entries` object.
    let array = def.and_then(|d| d.get("values")).and_then(Value::as_array);
    let entries = def.and_then(|d| d.get("entries")).and_then(Value::as_object);
    let values: Vec<&Value> = match (array, entries) {
        (Some(values), _) => values.iter().collect(),
        (None, Some(entries)) => entries.values().collect(),
        (None, None) => Vec::new(),
    };

    let quoted: Vec<String> = values
        .into_iter()
        .map(|v| json(v).unwrap_or_else(|| "null".to_string()))
        .collect();

    Ok(Some(format!("z.enum([{}])", quoted.join(", "))))
}

fn native_enum(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let table = ctx
        .def(node)
        .and_then(|d| d.get("values"))
        .filter(|v| v.is_truthy())
        .and_then(json)
        .unwrap_or_else(|| "{}".to_string());

    Ok(Some(format!("z.nativeEnum(/* native enum */{table})")))
}
