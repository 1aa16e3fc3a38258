//! Schema snapshots.
//!
//! A snapshot is a JSON object mapping export names to the internal object
//! graph of a Zod schema (`_def` / `_zod`). JSON cannot express every host
//! value the serializer inspects, so those are written as single-key tagged
//! objects:
//!
//! | Tagged form | Decoded value |
//! |-------------|---------------|
//! | `{"$undefined": null}` | `undefined` |
//! | `{"$bigint": "123"}` | big integer |
//! | `{"$date": "2024-01-01T00:00:00.000Z"}` | date |
//! | `{"$regex": {"source": "^a", "flags": "i"}}` | regular expression |
//! | `{"$function": <value>}` | thunk returning the decoded value |
//! | `{"$throws": "message"}` | thunk that throws |

use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde_json::Value as Json;
use zod_codepen::{CallError, Callable, Object, Value};

use crate::error::{CliResult, SnapshotError};

/// Named values in snapshot order.
pub type Snapshot = IndexMap<String, Value>;

/// Read and decode a snapshot file.
pub fn load_snapshot(path: &Path) -> CliResult<Snapshot> {
    if !path.exists() {
        return Err(SnapshotError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let snapshot = parse_snapshot(&content)?;
    tracing::debug!(path = %path.display(), entries = snapshot.len(), "loaded snapshot");
    Ok(snapshot)
}

/// Decode snapshot text.
pub fn parse_snapshot(content: &str) -> Result<Snapshot, SnapshotError> {
    let root: Json = serde_json::from_str(content)?;
    let Json::Object(entries) = root else {
        return Err(SnapshotError::NotAnObject);
    };

    // Export names are taken verbatim even when they look like tags.
    entries
        .iter()
        .map(|(name, value)| decode(value).map(|decoded| (name.clone(), decoded)))
        .collect()
}

/// Decode one JSON value into a runtime value.
pub fn decode(json: &Json) -> Result<Value, SnapshotError> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_f64() {
            Some(f) => Value::Number(f),
            None => return Err(SnapshotError::invalid_tag("number", n.to_string())),
        },
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::Array(items.iter().map(decode).collect::<Result<_, _>>()?),
        Json::Object(map) => {
            if map.len() == 1 {
                if let Some((key, payload)) = map.iter().next() {
                    if let Some(value) = decode_tagged(key, payload)? {
                        return Ok(value);
                    }
                }
            }

            let mut object = Object::with_capacity(map.len());
            for (key, value) in map {
                object.insert(key.clone(), decode(value)?);
            }
            Value::from(object)
        }
    })
}

/// Decode a tagged single-key object; `None` when `key` is not a tag.
fn decode_tagged(key: &str, payload: &Json) -> Result<Option<Value>, SnapshotError> {
    let value = match key {
        "$undefined" => Value::Undefined,
        "$bigint" => {
            let digits = payload
                .as_str()
                .ok_or_else(|| SnapshotError::invalid_tag(key, "expected a decimal string"))?;
            let parsed: BigInt = digits
                .parse()
                .map_err(|_| SnapshotError::invalid_tag(key, format!("'{digits}' is not an integer")))?;
            Value::BigInt(parsed)
        }
        "$date" => {
            let text = payload
                .as_str()
                .ok_or_else(|| SnapshotError::invalid_tag(key, "expected an ISO-8601 string"))?;
            let date = DateTime::parse_from_rfc3339(text)
                .map_err(|e| SnapshotError::invalid_tag(key, format!("'{text}': {e}")))?;
            Value::Date(date.with_timezone(&Utc))
        }
        "$regex" => {
            let source = payload
                .get("source")
                .and_then(Json::as_str)
                .ok_or_else(|| SnapshotError::invalid_tag(key, "missing 'source'"))?;
            let flags = payload.get("flags").and_then(Json::as_str).unwrap_or("");
            Value::regex(source, flags)
        }
        "$function" => Value::thunk(decode(payload)?),
        "$throws" => {
            let message = payload.as_str().unwrap_or("thrown from snapshot").to_string();
            Value::Function(Callable::new(move |_| Err(CallError::new(message.clone()))))
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}
