//! Dotted-key restructuring for flattened mappings.
//!
//! Turns one level of `{"a.b": 1, "a.c": 2}` into `{"a": {"b": 1, "c": 2}}`,
//! recursing into child mappings first so flattened keys at any depth are
//! resolved. Sequences are never looked into; only mapping values recurse.
//! The result does not depend on map iteration order, and applying the
//! transform to its own output is a no-op.

use serde_json::map::Entry;
use serde_json::{Map, Value};

use super::error::{CodecError, Result};

/// Restructure every dotted key in `map` into nested mappings, in place.
///
/// Keys without a dot pass through untouched. Dotted keys are split on `.`;
/// all but the last segment descend into (creating where absent) nested
/// mappings, the last segment receives the value, and the original dotted
/// key is removed. Sibling dotted keys sharing a path merge into the same
/// branch.
///
/// # Errors
///
/// Returns [`CodecError::KeyCollision`] when a path segment lands on an
/// existing non-mapping value. Descending further would have to overwrite
/// it, so the conflict is surfaced instead.
pub fn unflatten(map: &mut Map<String, Value>) -> Result<()> {
    let entries = std::mem::take(map);
    for (key, mut value) in entries {
        // Children first, so nested flattened keys are already resolved
        // when this level is rebuilt.
        if let Value::Object(child) = &mut value {
            unflatten(child)?;
        }
        if key.contains('.') {
            insert_path(map, &key, value)?;
        } else {
            merge_entry(map, key.clone(), value, &key)?;
        }
    }
    Ok(())
}

/// Restructure the top-level mapping of `value`, if it is one.
pub(crate) fn unflatten_value(value: &mut Value) -> Result<()> {
    if let Value::Object(map) = value {
        unflatten(map)?;
    }
    Ok(())
}

/// Walk the dotted `key` down from `map`, creating intermediate mappings,
/// and place `value` at the final segment.
fn insert_path(map: &mut Map<String, Value>, key: &str, value: Value) -> Result<()> {
    let mut current = map;
    let mut rest = key;
    while let Some((segment, tail)) = rest.split_once('.') {
        let slot = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(child) => child,
            _ => {
                return Err(CodecError::KeyCollision {
                    key: key.to_owned(),
                    segment: segment.to_owned(),
                })
            }
        };
        rest = tail;
    }
    merge_entry(current, rest.to_owned(), value, key)
}

/// Insert `value` under `key`, merging mapping-into-mapping when the slot is
/// already taken by one. Any other occupied slot is a collision; `origin` is
/// the dotted key being reported on failure.
fn merge_entry(map: &mut Map<String, Value>, key: String, value: Value, origin: &str) -> Result<()> {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(mut slot) => {
            let merged = match (slot.get_mut(), value) {
                (Value::Object(existing), Value::Object(incoming)) => {
                    for (k, v) in incoming {
                        merge_entry(existing, k, v, origin)?;
                    }
                    true
                }
                _ => false,
            };
            if merged {
                Ok(())
            } else {
                Err(CodecError::KeyCollision {
                    key: origin.to_owned(),
                    segment: slot.key().clone(),
                })
            }
        }
    }
}
