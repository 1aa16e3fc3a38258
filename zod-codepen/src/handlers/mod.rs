//! Type tags, the handler registry and the built-in handlers.
//!
//! Each handler renders one kind of schema node. Handlers are grouped by
//! family:
//!
//! - [`primitives`]: scalar constructors and their constraint chains
//! - [`literals`]: literal, enum and native enum
//! - [`collections`]: array, object, record, map and set
//! - [`wrappers`]: single-child modifiers such as optional or default
//! - [`composites`]: unions, tuples, functions and effect pipelines

mod collections;
mod composites;
mod literals;
mod primitives;
mod wrappers;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::serializer::Context;
use crate::value::{Object, Value};

/// A rendering function for one type tag.
///
/// Returns `Ok(None)` to let the dispatcher apply the generic fallback.
pub type Handler = Arc<dyn Fn(&Value, &Context<'_>) -> Result<Option<String>> + Send + Sync>;

macro_rules! type_tags {
    ($($variant:ident => $tag:literal),+ $(,)?) => {
        /// Schema type tags known to the built-in registry.
        ///
        /// Tags the adapter reports that are not listed here map to
        /// [`TypeTag::Other`], so newer schema kinds can still be dispatched
        /// to custom handlers.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum TypeTag {
            $(
                #[doc = concat!("`", $tag, "`")]
                $variant,
            )+
            /// Any tag without a built-in variant.
            Other(String),
        }

        impl TypeTag {
            /// The tag as reported by the adapter.
            pub fn as_str(&self) -> &str {
                match self {
                    $(TypeTag::$variant => $tag,)+
                    TypeTag::Other(tag) => tag,
                }
            }
        }

        impl From<&str> for TypeTag {
            fn from(tag: &str) -> Self {
                match tag {
                    $($tag => TypeTag::$variant,)+
                    other => TypeTag::Other(other.to_string()),
                }
            }
        }
    };
}

type_tags! {
    String => "string",
    Number => "number",
    Boolean => "boolean",
    BigInt => "bigint",
    Date => "date",
    Undefined => "undefined",
    Null => "null",
    Void => "void",
    Any => "any",
    Unknown => "unknown",
    Never => "never",
    NaN => "nan",
    Symbol => "symbol",
    Literal => "literal",
    Enum => "enum",
    NativeEnum => "nativeenum",
    Optional => "optional",
    Nullable => "nullable",
    Nullish => "nullish",
    Default => "default",
    Catch => "catch",
    Array => "array",
    Object => "object",
    Record => "record",
    Map => "map",
    Set => "set",
    Tuple => "tuple",
    Union => "union",
    DiscriminatedUnion => "discriminatedunion",
    Intersection => "intersection",
    Lazy => "lazy",
    Promise => "promise",
    Function => "function",
    Effects => "effects",
    Pipe => "pipe",
    Transform => "transform",
    Pipeline => "pipeline",
    Branded => "branded",
    Readonly => "readonly",
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        TypeTag::from(tag.as_str())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mapping from type tag to handler.
///
/// The built-in table is built once per process. Every serializer clones it
/// on construction, so registrations stay private to one instance.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TypeTag, Handler>,
}

static BUILTIN: Lazy<HandlerRegistry> = Lazy::new(|| {
    let mut registry = HandlerRegistry::default();
    primitives::register(&mut registry);
    literals::register(&mut registry);
    collections::register(&mut registry);
    wrappers::register(&mut registry);
    composites::register(&mut registry);
    registry
});

impl HandlerRegistry {
    /// A fresh copy of the built-in table.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Insert or replace the handler for `tag`.
    pub fn insert<F>(&mut self, tag: impl Into<TypeTag>, handler: F)
    where
        F: Fn(&Value, &Context<'_>) -> Result<Option<String>> + Send + Sync + 'static,
    {
        self.handlers.insert(tag.into(), Arc::new(handler));
    }

    /// Look up the handler for `tag`.
    pub fn get(&self, tag: &TypeTag) -> Option<&Handler> {
        self.handlers.get(tag)
    }

    /// Whether a handler is registered for `tag`.
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.handlers.keys().map(TypeTag::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("HandlerRegistry").field("tags", &tags).finish()
    }
}

// =========================================================================
// Shared helpers
// =========================================================================

/// A definition field that JavaScript would consider set (truthy).
pub(crate) fn field<'v>(def: &'v Object, key: &str) -> Option<&'v Value> {
    def.get(key).filter(|v| v.is_truthy())
}

/// A definition field holding a nested object, such as a v3 `type` child.
pub(crate) fn object_field<'v>(def: &'v Object, key: &str) -> Option<&'v Value> {
    def.get(key).filter(|v| v.as_object().is_some())
}

/// A count that may be stored bare or wrapped as `{ value, message }`.
pub(crate) fn count_field<'v>(def: &'v Object, key: &str) -> Option<&'v Value> {
    let raw = def.get(key).filter(|v| !v.is_nullish())?;
    match raw {
        Value::Object(_) => raw.get("value"),
        _ => Some(raw),
    }
}

/// Append `call` unless the exact same call is already present.
pub(crate) fn push_unique(calls: &mut Vec<String>, call: String) {
    if !calls.contains(&call) {
        calls.push(call);
    }
}

/// Serialize each item and join with `", "`.
pub(crate) fn serialize_list(items: &[Value], ctx: &Context<'_>) -> Result<String> {
    let rendered = items
        .iter()
        .map(|item| ctx.serialize(item))
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(", "))
}
