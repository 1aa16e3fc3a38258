//! Error types for the serialization engine.
//!
//! Most recoverable conditions never surface as errors: unknown input, unknown
//! type tags and callback-bearing nodes are rendered as comment placeholders.
//! The variants below cover the cases where a schema cannot be read at all.

use thiserror::Error;

/// Result type alias for serialization.
pub type Result<T> = std::result::Result<T, SerializeError>;

/// Error raised while rendering a schema node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SerializeError {
    /// A schema-owned callback needed to read structure threw.
    #[error("callback for '{field}' threw: {message}")]
    Callback { field: String, message: String },

    /// A date bound cannot be represented as an ISO-8601 string.
    #[error("invalid date value: {value}")]
    InvalidDate { value: String },

    /// A handler reported a failure for the given type tag.
    #[error("handler for '{tag}' failed: {message}")]
    Handler { tag: String, message: String },
}

impl SerializeError {
    /// Create a callback error.
    pub fn callback(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Callback {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create a handler error.
    pub fn handler(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            tag: tag.into(),
            message: message.into(),
        }
    }
}
