//! Zod v4 adapter.
//!
//! All v4 flavours (`zod`, `zod/v4`, `zod/mini`) share `_zod.def`, whose
//! `type` is already the lower-case tag. Classic schemas also expose `.def`
//! and `.type` shortcuts; the lightweight build is recognized by a string
//! `type` next to a callable `parse`. The v3 layout is accepted as a
//! fallback so mixed graphs still serialize.

use super::{v3_def, v3_type_tag, SchemaAdapter, ZodVersion};
use crate::value::{Object, Value};

/// Adapter for Zod 4.x schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZodV4Adapter;

/// `value._zod.def` when it is an object carrying a string `type`.
fn zod_def(value: &Value) -> Option<&Object> {
    let def = value.get("_zod")?.get("def")?.as_object()?;
    def.get("type")?.as_str()?;
    Some(def)
}

impl SchemaAdapter for ZodV4Adapter {
    fn version(&self) -> ZodVersion {
        ZodVersion::V4
    }

    fn is_schema(&self, value: &Value) -> bool {
        if zod_def(value).is_some() {
            return true;
        }

        let has_type = value.get("type").and_then(Value::as_str).is_some();
        let has_parse = value.get("parse").is_some_and(Value::is_callable);
        if has_type && has_parse {
            return true;
        }

        v3_def(value).is_some()
    }

    fn type_tag(&self, value: &Value) -> Option<String> {
        if !self.is_schema(value) {
            return None;
        }

        if let Some(tag) = value.get("type").and_then(Value::as_str) {
            return Some(tag.to_string());
        }

        let def_type = |def: Option<&Value>| {
            def.and_then(|d| d.get("type"))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        def_type(value.get("_zod").and_then(|z| z.get("def")))
            .or_else(|| def_type(value.get("def")))
            .or_else(|| {
                let type_name = v3_def(value)?.get("typeName")?.as_str()?;
                Some(v3_type_tag(type_name))
            })
    }

    fn raw_def<'a>(&self, value: &'a Value) -> Option<&'a Object> {
        if !self.is_schema(value) {
            return None;
        }

        value
            .get("_zod")
            .and_then(|z| z.get("def"))
            .and_then(Value::as_object)
            .or_else(|| value.get("def").and_then(Value::as_object))
            .or_else(|| value.get("_def").and_then(Value::as_object))
    }
}
