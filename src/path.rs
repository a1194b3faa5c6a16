//! Dotted-path access into JSON rows.
//!
//! The engine is generic over row shape, so every field lookup goes
//! through a dot-delimited path (e.g. `"user.address.city"`) resolved at
//! runtime. Absence is represented as `None`, never an error: search,
//! filters, sort, and export all treat a missing value as "no value".

use serde_json::{Map, Value};

/// Resolve `path` against `row`, one object key per dot-separated segment.
///
/// A missing key or a non-object intermediate short-circuits to `None`.
pub fn get_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = row;

    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

/// Write `value` at `path` inside `row`, creating intermediate objects
/// for every segment but the last.
///
/// Non-object intermediates (including a non-object `row`) are replaced
/// with fresh objects, so the write always succeeds. After
/// `set_path(row, path, value)`, `get_path(row, path)` yields the value.
pub fn set_path(row: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, intermediate)) = segments.split_last() else {
        return;
    };

    if !row.is_object() {
        *row = Value::Object(Map::new());
    }

    let mut current = row;
    for segment in intermediate {
        let object = current
            .as_object_mut()
            .expect("intermediate segments are always objects here");
        let entry = object
            .entry((*segment).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }

        current = entry;
    }

    current
        .as_object_mut()
        .expect("the final segment's parent is always an object here")
        .insert((*last).to_owned(), value);
}
