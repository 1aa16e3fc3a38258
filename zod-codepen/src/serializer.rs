//! The serializer façade and its dispatcher.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::adapter::{SchemaAdapter, ZodV3Adapter, ZodV4Adapter, ZodVersion};
use crate::error::Result;
use crate::handlers::{HandlerRegistry, TypeTag};
use crate::module::ModuleBuilder;
use crate::options::{Optimizations, SerializeOptions};
use crate::value::{Object, Value};

/// Rendering state shared by every handler during one `serialize` call.
///
/// The context is immutable. Recursing into a child at a deeper indentation
/// level produces a copy with a different `indent_level`.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    adapter: &'a dyn SchemaAdapter,
    handlers: &'a HandlerRegistry,
    options: &'a SerializeOptions,
    indent_level: usize,
}

impl<'a> Context<'a> {
    fn new(
        adapter: &'a dyn SchemaAdapter,
        handlers: &'a HandlerRegistry,
        options: &'a SerializeOptions,
    ) -> Self {
        Self {
            adapter,
            handlers,
            options,
            indent_level: options.indent_level,
        }
    }

    /// The adapter for the active Zod version.
    pub fn adapter(&self) -> &'a dyn SchemaAdapter {
        self.adapter
    }

    /// The options of the current call.
    pub fn options(&self) -> &'a SerializeOptions {
        self.options
    }

    /// Shorthand for `options().optimizations`.
    pub fn optimizations(&self) -> &'a Optimizations {
        &self.options.optimizations
    }

    /// Current indentation depth.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// The indentation string for `level`.
    pub fn indent(&self, level: usize) -> String {
        self.options.indent.repeat(level)
    }

    /// Serialize a child node at the current depth.
    pub fn serialize(&self, node: &Value) -> Result<String> {
        self.dispatch(node)
    }

    /// Serialize a child node at an explicit depth.
    pub fn serialize_at(&self, node: &Value, level: usize) -> Result<String> {
        Context {
            indent_level: level,
            ..*self
        }
        .dispatch(node)
    }

    /// The raw definition of a schema node.
    pub fn def<'v>(&self, node: &'v Value) -> Option<&'v Object> {
        self.adapter.raw_def(node)
    }

    /// Whether `value` is a schema for the active version.
    pub fn is_schema(&self, value: &Value) -> bool {
        self.adapter.is_schema(value)
    }

    /// The type tag of a schema node.
    pub fn type_tag(&self, node: &Value) -> Option<String> {
        self.adapter.type_tag(node)
    }

    fn dispatch(&self, node: &Value) -> Result<String> {
        if !self.adapter.is_schema(node) {
            return Ok(format!("/* not a zod schema: {} */", node.type_of()));
        }

        let Some(tag) = self.adapter.type_tag(node) else {
            return Ok("z.any() /* unknown type */".to_string());
        };
        let tag = TypeTag::from(tag);

        match self.handlers.get(&tag) {
            Some(handler) => {
                if let Some(rendered) = handler(node, self)? {
                    return Ok(rendered);
                }
                debug!(%tag, "handler deferred to fallback");
            }
            None => warn!(%tag, "no handler registered for type tag"),
        }

        Ok(format!("z.any() /* unhandled type: {tag} */"))
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("version", &self.adapter.version())
            .field("indent_level", &self.indent_level)
            .finish_non_exhaustive()
    }
}

/// Serializes schema graphs of one Zod version into TypeScript source.
///
/// Each instance owns a private copy of the built-in handler table, so
/// [`register_handler`](Serializer::register_handler) never leaks into other
/// instances.
///
/// # Example
///
/// ```rust
/// use zod_codepen::{Serializer, SerializeOptions, Value};
///
/// let schema = Value::object([(
///     "_zod",
///     Value::object([("def", Value::object([("type", Value::from("string"))]))]),
/// )]);
///
/// let code = Serializer::v4().serialize(&schema, &SerializeOptions::default()).unwrap();
/// assert_eq!(code, "z.string()");
/// ```
#[derive(Clone)]
pub struct Serializer {
    adapter: Arc<dyn SchemaAdapter>,
    handlers: HandlerRegistry,
}

impl Serializer {
    /// Create a serializer for the given adapter.
    pub fn new(adapter: Arc<dyn SchemaAdapter>) -> Self {
        Self {
            adapter,
            handlers: HandlerRegistry::builtin(),
        }
    }

    /// Serializer for Zod 3.x schemas.
    pub fn v3() -> Self {
        Self::new(Arc::new(ZodV3Adapter))
    }

    /// Serializer for Zod 4.x schemas.
    pub fn v4() -> Self {
        Self::new(Arc::new(ZodV4Adapter))
    }

    /// Serializer for a version chosen at runtime.
    pub fn for_version(version: ZodVersion) -> Self {
        match version {
            ZodVersion::V3 => Self::v3(),
            ZodVersion::V4 => Self::v4(),
        }
    }

    /// The adapter this serializer reads schemas with.
    pub fn adapter(&self) -> &dyn SchemaAdapter {
        self.adapter.as_ref()
    }

    /// The handler table of this instance.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Insert or replace the handler for one type tag on this instance only.
    pub fn register_handler<F>(&mut self, tag: impl Into<TypeTag>, handler: F)
    where
        F: Fn(&Value, &Context<'_>) -> Result<Option<String>> + Send + Sync + 'static,
    {
        self.handlers.insert(tag, handler);
    }

    /// Render one schema node as a Zod expression.
    ///
    /// Values that are not schemas render as a comment placeholder instead of
    /// failing.
    pub fn serialize(&self, node: &Value, options: &SerializeOptions) -> Result<String> {
        Context::new(self.adapter.as_ref(), &self.handlers, options).serialize(node)
    }

    /// Render a module exporting every schema in `schemas`.
    ///
    /// Entries that are not schemas are skipped. An entry that fails to
    /// serialize is logged and exported as `z.any()`.
    pub fn generate_module(
        &self,
        schemas: &IndexMap<String, Value>,
        options: &SerializeOptions,
    ) -> String {
        ModuleBuilder::new()
            .include_types(false)
            .generate(self, schemas, options)
            .code
    }
}

impl fmt::Debug for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("version", &self.adapter.version())
            .field("handlers", &self.handlers)
            .finish()
    }
}
