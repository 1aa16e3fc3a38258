//! Multi-child schemas and effect pipelines.

use super::{field, serialize_list, HandlerRegistry, TypeTag};
use crate::error::Result;
use crate::render::json;
use crate::serializer::Context;
use crate::value::{Object, Value};

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry.insert(TypeTag::Tuple, tuple);
    registry.insert(TypeTag::Union, union);
    registry.insert(TypeTag::DiscriminatedUnion, discriminated_union);
    registry.insert(TypeTag::Intersection, intersection);
    registry.insert(TypeTag::Function, function);
    registry.insert(TypeTag::Effects, effects);
    registry.insert(TypeTag::Pipe, pipe);
    registry.insert(TypeTag::Pipeline, pipeline);
    registry.insert(TypeTag::Transform, |_, _| Ok(Some("/* transform */".to_string())));
}

/// An array-valued definition field, empty when absent.
fn list<'v>(def: Option<&'v Object>, key: &str) -> &'v [Value] {
    def.and_then(|d| d.get(key))
        .and_then(Value::as_array)
        .unwrap_or_default()
}

fn tuple(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let mut result = format!("z.tuple([{}])", serialize_list(list(def, "items"), ctx)?);

    if let Some(rest) = def.and_then(|d| field(d, "rest")) {
        result.push_str(&format!(".rest({})", ctx.serialize(rest)?));
    }

    Ok(Some(result))
}

fn union(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let options = serialize_list(list(def, "options"), ctx)?;

    // v4 reports discriminated unions under the plain `union` tag.
    match def.and_then(|d| field(d, "discriminator")) {
        Some(discriminator) => Ok(Some(format!(
            "z.discriminatedUnion({}, [{options}])",
            discriminator_literal(Some(discriminator))
        ))),
        None => Ok(Some(format!("z.union([{options}])"))),
    }
}

fn discriminated_union(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let options = serialize_list(list(def, "options"), ctx)?;
    let discriminator = discriminator_literal(def.and_then(|d| d.get("discriminator")));

    Ok(Some(format!("z.discriminatedUnion({discriminator}, [{options}])")))
}

fn discriminator_literal(value: Option<&Value>) -> String {
    value.and_then(json).unwrap_or_else(|| "undefined".to_string())
}

fn intersection(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let left = def.and_then(|d| field(d, "left"));
    let right = def.and_then(|d| field(d, "right"));

    match (left, right) {
        (Some(left), Some(right)) => Ok(Some(format!(
            "z.intersection({}, {})",
            ctx.serialize(left)?,
            ctx.serialize(right)?
        ))),
        _ => Ok(Some("z.any()".to_string())),
    }
}

fn function(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let mut result = "z.function()".to_string();

    // v3 wraps the parameters in a tuple schema.
    if let Some(args) = def.and_then(|d| d.get("args")).filter(|a| ctx.is_schema(a)) {
        let items = list(ctx.def(args), "items");
        if !items.is_empty() {
            result.push_str(&format!(".args({})", serialize_list(items, ctx)?));
        }
    }

    if let Some(returns) = def.and_then(|d| d.get("returns")).filter(|r| ctx.is_schema(r)) {
        if ctx.type_tag(returns).as_deref() != Some("unknown") {
            result.push_str(&format!(".returns({})", ctx.serialize(returns)?));
        }
    }

    Ok(Some(result))
}

// =========================================================================
// Effects
// =========================================================================

fn effects(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let Some(inner) = def.and_then(|d| field(d, "schema")) else {
        return Ok(Some("z.any()".to_string()));
    };
    let inner = ctx.serialize(inner)?;

    let effect = def
        .and_then(|d| d.get("effect"))
        .and_then(|e| e.get("type"))
        .and_then(Value::as_str);

    // refine and superRefine share the `refinement` effect.
    Ok(Some(match effect {
        Some("refinement") => format!("{inner}.refine(/* refinement function */)"),
        Some("transform") => format!("{inner}.transform(/* transform function */)"),
        Some("preprocess") => format!("z.preprocess(/* preprocess function */, {inner})"),
        _ => inner,
    }))
}

fn pipe(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let Some(input) = def.and_then(|d| field(d, "in").or_else(|| field(d, "innerType"))) else {
        return Ok(Some("z.any()".to_string()));
    };
    let input = ctx.serialize(input)?;

    let Some(output) = def.and_then(|d| d.get("out")).filter(|o| ctx.is_schema(o)) else {
        return Ok(Some(input));
    };

    // `.transform()` in v4 is a pipe into a transform node.
    if ctx.type_tag(output).as_deref() == Some("transform") {
        return Ok(Some(format!("{input}.transform(/* transform function */)")));
    }

    Ok(Some(format!("{input}.pipe({})", ctx.serialize(output)?)))
}

fn pipeline(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let def = ctx.def(node);
    let Some(input) = def.and_then(|d| field(d, "in")) else {
        return Ok(Some("z.any()".to_string()));
    };
    let input = ctx.serialize(input)?;

    match def.and_then(|d| field(d, "out")) {
        Some(output) => Ok(Some(format!("{input}.pipe({})", ctx.serialize(output)?))),
        None => Ok(Some(input)),
    }
}
