//! Dotted-key handling: `"config.db.host"` means service `config`, then key
//! `db`, then key `host`.

use crate::error::{Error, Result};
use crate::locator::Service;
use serde_json::Value;
use std::sync::Arc;

/// Reads `segments` out of an array-shaped service.
///
/// `path` is the full dotted key, kept for error reporting. The service must be
/// a `serde_json::Value`; objects are indexed by key and arrays by position.
/// A `null` entry counts as absent.
pub(crate) fn read_keys(path: &str, service: &Service, segments: &[&str]) -> Result<Value> {
  let Some((first, _)) = segments.split_first() else {
    return Err(Error::Internal(format!("empty dotted path for '{}'", path)));
  };
  let mut current = service
    .downcast_ref::<Value>()
    .ok_or_else(|| Error::NotIndexable {
      path: path.to_owned(),
      segment: (*first).to_owned(),
    })?;

  for segment in segments {
    current = index(current, path, segment)?;
  }
  Ok(current.clone())
}

fn index<'v>(value: &'v Value, path: &str, segment: &str) -> Result<&'v Value> {
  let found = match value {
    Value::Object(map) => map.get(segment),
    Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
    _ => {
      return Err(Error::NotIndexable {
        path: path.to_owned(),
        segment: segment.to_owned(),
      })
    }
  };
  match found {
    Some(v) if !v.is_null() => Ok(v),
    _ => Err(Error::MissingKey {
      key: segment.to_owned(),
    }),
  }
}

// Only canonical decimal segments address array positions: "01" and "+1"
// are keys, and arrays have no keys.
fn array_index(segment: &str) -> Option<usize> {
  let canonical = !segment.is_empty()
    && segment.bytes().all(|b| b.is_ascii_digit())
    && (segment == "0" || !segment.starts_with('0'));
  if canonical {
    segment.parse().ok()
  } else {
    None
  }
}

/// Wraps an extracted value so it can travel as an injected argument.
pub(crate) fn into_service(value: Value) -> Service {
  Arc::new(value)
}
