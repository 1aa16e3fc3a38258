//! Zod v3 adapter.
//!
//! In Zod v3 every schema carries `_def`, whose `typeName` is the class name
//! (`"ZodString"`, `"ZodObject"`, ...). The definition is `_def` itself.

use super::{v3_def, v3_type_tag, SchemaAdapter, ZodVersion};
use crate::value::{Object, Value};

/// Adapter for Zod 3.x schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZodV3Adapter;

impl SchemaAdapter for ZodV3Adapter {
    fn version(&self) -> ZodVersion {
        ZodVersion::V3
    }

    fn is_schema(&self, value: &Value) -> bool {
        v3_def(value).is_some()
    }

    fn type_tag(&self, value: &Value) -> Option<String> {
        let type_name = v3_def(value)?.get("typeName")?.as_str()?;
        Some(v3_type_tag(type_name))
    }

    fn raw_def<'a>(&self, value: &'a Value) -> Option<&'a Object> {
        v3_def(value)
    }
}
