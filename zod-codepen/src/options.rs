//! Serialization options.

use serde::{Deserialize, Serialize};

/// Options controlling how a schema is rendered.
///
/// Deserializes with `#[serde(default)]`, so a partially specified table
/// merges over the defaults:
///
/// ```rust
/// use zod_codepen::SerializeOptions;
///
/// let opts: SerializeOptions = serde_json::from_str(r#"{ "format": false }"#).unwrap();
/// assert!(!opts.format);
/// assert_eq!(opts.indent, "  ");
/// assert!(opts.optimizations.semantic_methods);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializeOptions {
    /// String used for one level of indentation.
    pub indent: String,
    /// Starting indentation depth.
    pub indent_level: usize,
    /// Pretty-print object literals one property per line.
    pub format: bool,
    /// Output optimizations.
    pub optimizations: Optimizations,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            indent_level: 0,
            format: true,
            optimizations: Optimizations::default(),
        }
    }
}

impl SerializeOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self {
            format: false,
            ..Self::default()
        }
    }

    /// Set the indentation string.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the starting indentation depth.
    pub fn with_indent_level(mut self, level: usize) -> Self {
        self.indent_level = level;
        self
    }

    /// Enable or disable pretty printing.
    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    /// Replace the optimization flags.
    pub fn with_optimizations(mut self, optimizations: Optimizations) -> Self {
        self.optimizations = optimizations;
        self
    }
}

/// Optional output rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Optimizations {
    /// Recover `.positive()`, `.nonnegative()`, `.safe()` and friends from
    /// their encoded bounds.
    pub semantic_methods: bool,
    /// Render boundary constants symbolically (`2**31 - 1`).
    pub scientific_notation: bool,
}

impl Default for Optimizations {
    fn default() -> Self {
        Self {
            semantic_methods: true,
            scientific_notation: true,
        }
    }
}

impl Optimizations {
    /// Every rewrite disabled: constraints render literally.
    pub fn none() -> Self {
        Self {
            semantic_methods: false,
            scientific_notation: false,
        }
    }
}
