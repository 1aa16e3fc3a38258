//! Dynamic runtime values.
//!
//! A Zod schema is a plain JavaScript object graph: nested definition
//! objects, arrays of checks, thunks for deferred shapes and default values.
//! [`Value`] models exactly the JavaScript value kinds the serializer needs to
//! read from such a graph. The serializer never constructs or mutates schema
//! values; it only inspects them through a
//! [`SchemaAdapter`](crate::adapter::SchemaAdapter).
//!
//! # Example
//!
//! ```rust
//! use zod_codepen::value::Value;
//!
//! // Roughly what `z.string().min(3)` looks like in Zod v3.
//! let schema = Value::object([(
//!     "_def",
//!     Value::object([
//!         ("typeName", Value::from("ZodString")),
//!         (
//!             "checks",
//!             Value::array([Value::object([
//!                 ("kind", Value::from("min")),
//!                 ("value", Value::from(3)),
//!             ])]),
//!         ),
//!     ]),
//! )]);
//!
//! assert_eq!(schema.type_of(), "object");
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use thiserror::Error;

/// An ordered property map. Insertion order is output order.
pub type Object = IndexMap<String, Value>;

/// A shared `undefined`, for lookups that need a borrowed fallback.
pub(crate) static UNDEFINED: Value = Value::Undefined;

/// Largest time value a JavaScript `Date` can hold, in milliseconds.
const MAX_DATE_MILLIS: f64 = 8.64e15;

/// An exception raised by a [`Callable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CallError {
    /// The thrown message.
    pub message: String,
}

impl CallError {
    /// Create a new call error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type CallFn = dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync;

/// A callable value: thunks, getters and callbacks embedded in a schema.
#[derive(Clone)]
pub struct Callable(Arc<CallFn>);

impl Callable {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A thunk that ignores its arguments and returns `value`.
    pub fn returning(value: Value) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }

    /// A thunk that always throws `message`.
    pub fn throwing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(CallError::new(message.clone())))
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        (self.0)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[Function]")
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A regular expression literal, kept as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExp {
    /// Pattern source, without delimiters.
    pub source: String,
    /// Flag letters (`gimsuy`...).
    pub flags: String,
}

impl RegExp {
    /// Create a regular expression literal.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // An empty pattern prints as `(?:)` so the literal stays parseable.
        let source = if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        };
        write!(f, "/{}/{}", source, self.flags)
    }
}

/// A JavaScript value as seen by the serializer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// `undefined`
    #[default]
    Undefined,
    /// `null`
    Null,
    /// A boolean.
    Bool(bool),
    /// A double precision number.
    Number(f64),
    /// An arbitrary precision integer (`123n`).
    BigInt(BigInt),
    /// A string.
    String(String),
    /// A `Date` instance.
    Date(DateTime<Utc>),
    /// A `RegExp` instance.
    RegExp(RegExp),
    /// An array.
    Array(Vec<Value>),
    /// A plain object. Shared so that sub-graphs can be referenced twice.
    Object(Arc<Object>),
    /// A function.
    Function(Callable),
}

impl Value {
    /// Build an object from key/value pairs, preserving order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build an array.
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Array(items.into_iter().collect())
    }

    /// Wrap a closure as a function value.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Value::Function(Callable::new(f))
    }

    /// A function value that returns `value` when called.
    pub fn thunk(value: Value) -> Self {
        Value::Function(Callable::returning(value))
    }

    /// A big integer value.
    pub fn bigint(value: impl Into<BigInt>) -> Self {
        Value::BigInt(value.into())
    }

    /// A regular expression value.
    pub fn regex(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::RegExp(RegExp::new(source, flags))
    }

    /// Property lookup. Returns `None` for non-objects and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Borrow as a plain object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow as an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value, for numbers only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean value, for booleans only.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as a big integer.
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(b) => Some(b),
            _ => None,
        }
    }

    /// Borrow as a callable.
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// `true` for functions.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// `true` for `undefined` and `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(b) => b != &BigInt::default(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The `typeof` name of this value.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Null | Value::Date(_) | Value::RegExp(_) | Value::Array(_) | Value::Object(_) => {
                "object"
            }
        }
    }

    /// Best-effort `JSON.stringify` conversion.
    ///
    /// Returns `None` where JSON has no representation (`undefined`,
    /// functions). Dates become ISO strings.
    ///
    /// Big integers become quoted decimal strings where `JSON.stringify`
    /// would throw instead. A native enum table holding a bigint member
    /// therefore renders that member as `"5"` rather than failing.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;

        Some(match self {
            Value::Undefined | Value::Function(_) => return None,
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => json_number(*n),
            Value::BigInt(b) => Json::String(b.to_string()),
            Value::String(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(iso_string(d)),
            Value::RegExp(_) => Json::Object(serde_json::Map::new()),
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .map(|v| v.to_json().unwrap_or(Json::Null))
                    .collect(),
            ),
            Value::Object(map) => Json::Object(
                map.iter()
                    .filter_map(|(k, v)| v.to_json().map(|j| (k.clone(), j)))
                    .collect(),
            ),
        })
    }
}

fn json_number(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    // Integral values print without a fraction, like `JSON.stringify`.
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Render a date the way `Date.prototype.toISOString` does.
pub fn iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Interpret a millisecond timestamp the way `new Date(ms)` does.
///
/// Returns `None` for values outside the representable range, where
/// `toISOString` would throw.
pub fn date_from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.abs() > MAX_DATE_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Self {
        Value::BigInt(b)
    }
}

impl From<RegExp> for Value {
    fn from(r: RegExp) -> Self {
        Value::RegExp(r)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(Arc::new(map))
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Function(f)
    }
}
