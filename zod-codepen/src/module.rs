//! Module generation.
//!
//! [`ModuleBuilder`] turns an ordered set of named schemas into a TypeScript
//! module: an optional header, the `zod` import, one `export const` per schema
//! and optionally `z.infer` type exports. [`Serializer::generate_module`] is the
//! bare variant without header or type exports.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::options::SerializeOptions;
use crate::serializer::Serializer;
use crate::value::{iso_string, Value};

/// The import statement every generated module starts with.
pub const IMPORT_LINE: &str = "import { z } from 'zod';";

/// Suffix marking type-only exports.
pub const TYPE_SUFFIX: &str = "Type";

/// Prefix marking internal exports.
pub const INTERNAL_PREFIX: char = '$';

/// Export filter deciding which named schemas end up in a module.
pub type ExportFilter = Arc<dyn Fn(&str, &Value) -> bool + Send + Sync>;

/// The default export filter.
///
/// Excludes names starting with `$` and names ending with `Type`. Either
/// condition alone excludes the name.
pub fn default_filter(name: &str) -> bool {
    !name.starts_with(INTERNAL_PREFIX) && !name.ends_with(TYPE_SUFFIX)
}

/// The standard "do not edit" block comment.
pub fn generated_header(generator: &str, timestamp: DateTime<Utc>) -> String {
    [
        "/**".to_string(),
        " * AUTO-GENERATED FILE - DO NOT EDIT".to_string(),
        " *".to_string(),
        format!(" * Generated by {generator} at {}", iso_string(&timestamp)),
        " */".to_string(),
    ]
    .join("\n")
}

/// The result of generating a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedModule {
    /// The module source.
    pub code: String,
    /// Names exported with their serialized schema.
    pub exported: Vec<String>,
    /// Names that failed to serialize and were exported as `z.any()`.
    pub failed: Vec<String>,
    /// Names rejected by the export filter.
    pub filtered: Vec<String>,
    /// Names whose value is not a schema.
    pub skipped: Vec<String>,
}

impl GeneratedModule {
    /// Number of `export const` statements in the module.
    pub fn export_count(&self) -> usize {
        self.exported.len() + self.failed.len()
    }
}

/// Builder for generated modules.
///
/// ```rust
/// use indexmap::IndexMap;
/// use zod_codepen::{ModuleBuilder, Serializer, SerializeOptions, Value};
///
/// let string = Value::object([(
///     "_zod",
///     Value::object([("def", Value::object([("type", Value::from("string"))]))]),
/// )]);
/// let mut schemas = IndexMap::new();
/// schemas.insert("Name".to_string(), string);
///
/// let module = ModuleBuilder::new()
///     .with_default_filter()
///     .generate(&Serializer::v4(), &schemas, &SerializeOptions::default());
///
/// assert!(module.code.contains("export const Name = z.string();"));
/// assert!(module.code.contains("export type Name = z.infer<typeof Name>;"));
/// ```
#[derive(Clone)]
pub struct ModuleBuilder {
    header: Option<String>,
    include_types: bool,
    filter: Option<ExportFilter>,
}

impl Default for ModuleBuilder {
    fn default() -> Self {
        Self {
            header: None,
            include_types: true,
            filter: None,
        }
    }
}

impl ModuleBuilder {
    /// A builder with no header, no filter and type exports on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `header` above the import, followed by a blank line.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Emit `export type X = z.infer<typeof X>;` lines.
    pub fn include_types(mut self, include: bool) -> Self {
        self.include_types = include;
        self
    }

    /// Only export entries accepted by `filter`.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, &Value) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Use [`default_filter`].
    pub fn with_default_filter(self) -> Self {
        self.with_filter(|name, _| default_filter(name))
    }

    /// Generate the module.
    ///
    /// Never fails: an entry whose serialization fails is logged and exported
    /// as `z.any()` with a trailing comment.
    pub fn generate(
        &self,
        serializer: &Serializer,
        schemas: &IndexMap<String, Value>,
        options: &SerializeOptions,
    ) -> GeneratedModule {
        let mut module = GeneratedModule::default();
        let mut lines: Vec<String> = Vec::new();

        if let Some(header) = &self.header {
            lines.push(header.clone());
            lines.push(String::new());
        }
        lines.push(IMPORT_LINE.to_string());
        lines.push(String::new());

        for (name, schema) in schemas {
            if !serializer.adapter().is_schema(schema) {
                module.skipped.push(name.clone());
                continue;
            }
            if let Some(filter) = &self.filter {
                if !filter(name, schema) {
                    debug!(name = %name, "export filtered");
                    module.filtered.push(name.clone());
                    continue;
                }
            }

            match serializer.serialize(schema, options) {
                Ok(code) => {
                    lines.push(format!("export const {name} = {code};"));
                    module.exported.push(name.clone());
                }
                Err(error) => {
                    warn!(name = %name, %error, "failed to serialize schema");
                    lines.push(format!("export const {name} = z.any(); // Serialization failed"));
                    module.failed.push(name.clone());
                }
            }
            lines.push(String::new());
        }

        if self.include_types && !module.exported.is_empty() {
            lines.push("// Type exports".to_string());
            lines.extend(
                module
                    .exported
                    .iter()
                    .map(|name| format!("export type {name} = z.infer<typeof {name}>;")),
            );
        }

        module.code = lines.join("\n");
        module
    }
}

impl fmt::Debug for ModuleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleBuilder")
            .field("header", &self.header)
            .field("include_types", &self.include_types)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
