//! Version adapters.
//!
//! Zod v3 and v4 lay out their internals differently. An adapter is the only
//! place that knows those field paths: it recognizes schema values, extracts
//! the type tag and returns the raw definition object. Every handler is
//! written once against this trait.
//!
//! Supporting another Zod major means adding one more implementation here.

mod v3;
mod v4;

use std::fmt;

pub use v3::ZodV3Adapter;
pub use v4::ZodV4Adapter;

use crate::value::{Object, Value};

/// Supported Zod major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodVersion {
    /// Zod 3.x (`_def.typeName`).
    V3,
    /// Zod 4.x, classic and mini (`_zod.def.type`).
    V4,
}

impl ZodVersion {
    /// Short identifier (`"v3"` / `"v4"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ZodVersion::V3 => "v3",
            ZodVersion::V4 => "v4",
        }
    }

    /// The adapter for this version.
    pub fn adapter(&self) -> &'static dyn SchemaAdapter {
        match self {
            ZodVersion::V3 => &ZodV3Adapter,
            ZodVersion::V4 => &ZodV4Adapter,
        }
    }
}

impl fmt::Display for ZodVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ZodVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v3" | "3" => Ok(ZodVersion::V3),
            "v4" | "4" => Ok(ZodVersion::V4),
            other => Err(format!("unsupported zod version '{other}' (expected v3 or v4)")),
        }
    }
}

/// Read-only access to version-specific schema internals.
///
/// Adapters are stateless and shared by every serializer that uses them.
pub trait SchemaAdapter: Send + Sync {
    /// The Zod version this adapter understands.
    fn version(&self) -> ZodVersion;

    /// Whether `value` is a schema produced by this Zod version.
    fn is_schema(&self, value: &Value) -> bool;

    /// The lower-case type tag (`"string"`, `"object"`, ...).
    ///
    /// Returns `None` for values that are not schemas.
    fn type_tag(&self, value: &Value) -> Option<String>;

    /// The raw definition object backing the schema.
    ///
    /// Returns `None` for values that are not schemas. Handlers treat a
    /// missing definition as "render the untyped fallback".
    fn raw_def<'a>(&self, value: &'a Value) -> Option<&'a Object>;
}

/// Normalize a v3 type name: `"ZodString"` becomes `"string"`.
pub(crate) fn v3_type_tag(type_name: &str) -> String {
    type_name
        .strip_prefix("Zod")
        .unwrap_or(type_name)
        .to_lowercase()
}

/// `value._def` when it is an object carrying a string `typeName`.
pub(crate) fn v3_def(value: &Value) -> Option<&Object> {
    let def = value.get("_def")?.as_object()?;
    def.get("typeName")?.as_str()?;
    Some(def)
}
