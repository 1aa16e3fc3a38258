//! Single-child wrappers: modifiers, defaults, promises and lazy schemas.

use super::{field, object_field, HandlerRegistry, TypeTag};
use crate::error::Result;
use crate::render::primitive_literal;
use crate::serializer::Context;
use crate::value::Value;

pub(super) fn register(registry: &mut HandlerRegistry) {
    for (tag, modifier) in [
        (TypeTag::Optional, "optional"),
        (TypeTag::Nullable, "nullable"),
        (TypeTag::Nullish, "nullish"),
    ] {
        registry.insert(tag, move |node, ctx| modifier_call(node, ctx, modifier));
    }

    registry.insert(TypeTag::Default, |node, ctx| fallback_value(node, ctx, FallbackKind::Default));
    registry.insert(TypeTag::Catch, |node, ctx| fallback_value(node, ctx, FallbackKind::Catch));
    registry.insert(TypeTag::Readonly, readonly);
    registry.insert(TypeTag::Branded, branded);
    registry.insert(TypeTag::Promise, promise);
    registry.insert(TypeTag::Lazy, |_, _| {
        Ok(Some("z.lazy(() => /* circular reference */)".to_string()))
    });
}

/// `<inner>.<modifier>()`, over `z.any()` when the inner schema is missing.
fn modifier_call(node: &Value, ctx: &Context<'_>, modifier: &str) -> Result<Option<String>> {
    let inner = match ctx.def(node).and_then(|d| field(d, "innerType")) {
        Some(inner) => ctx.serialize(inner)?,
        None => "z.any()".to_string(),
    };
    Ok(Some(format!("{inner}.{modifier}()")))
}

fn readonly(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    match ctx.def(node).and_then(|d| field(d, "innerType")) {
        Some(inner) => Ok(Some(format!("{}.readonly()", ctx.serialize(inner)?))),
        None => Ok(Some("z.any()".to_string())),
    }
}

fn branded(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    // The brand itself only exists at the type level.
    match ctx.def(node).and_then(|d| object_field(d, "type")) {
        Some(inner) => Ok(Some(format!("{}.brand()", ctx.serialize(inner)?))),
        None => Ok(Some("z.any()".to_string())),
    }
}

fn promise(node: &Value, ctx: &Context<'_>) -> Result<Option<String>> {
    let inner = ctx
        .def(node)
        .and_then(|d| field(d, "innerType").or_else(|| object_field(d, "type")));
    match inner {
        Some(inner) => Ok(Some(format!("z.promise({})", ctx.serialize(inner)?))),
        None => Ok(Some("z.promise(z.any())".to_string())),
    }
}

// =========================================================================
// Default / Catch
// =========================================================================

#[derive(Debug, Clone, Copy)]
enum FallbackKind {
    Default,
    Catch,
}

impl FallbackKind {
    fn method(self) -> &'static str {
        match self {
            FallbackKind::Default => "default",
            FallbackKind::Catch => "catch",
        }
    }

    fn field(self) -> &'static str {
        match self {
            FallbackKind::Default => "defaultValue",
            FallbackKind::Catch => "catchValue",
        }
    }

    /// Arguments a getter is invoked with.
    fn arguments(self) -> Vec<Value> {
        match self {
            FallbackKind::Default => Vec::new(),
            FallbackKind::Catch => vec![Value::object([
                ("error", Value::Null),
                ("input", Value::Undefined),
            ])],
        }
    }
}

fn fallback_value(node: &Value, ctx: &Context<'_>, kind: FallbackKind) -> Result<Option<String>> {
    let Some(def) = ctx.def(node) else {
        return Ok(Some("z.any()".to_string()));
    };
    let Some(inner) = field(def, "innerType") else {
        return Ok(Some("z.any()".to_string()));
    };
    let inner = ctx.serialize(inner)?;

    let argument = match def.get(kind.field()) {
        // v3 always stores a getter; only primitive results are inlined.
        Some(Value::Function(getter)) => match getter.call(&kind.arguments()) {
            Ok(value) => primitive_literal(&value).unwrap_or_else(|| "/* function */".to_string()),
            Err(error) => {
                tracing::debug!(method = kind.method(), %error, "fallback getter threw");
                "/* function */".to_string()
            }
        },
        None | Some(Value::Undefined) => "undefined".to_string(),
        Some(value) => {
            primitive_literal(value).unwrap_or_else(|| "/* non-serializable value */".to_string())
        }
    };

    Ok(Some(format!("{inner}.{}({argument})", kind.method())))
}
