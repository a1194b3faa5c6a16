//! An owned row collection with identity-keyed mutation helpers.

use serde_json::Value;

use crate::selection::RowKey;

/// The row set behind a table, for callers who mutate rows locally
/// instead of refetching.
///
/// All mutation helpers resolve rows by identity through the key field,
/// so they keep working after the set is re-sorted or re-filtered
/// elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    key_field: String,
    rows: Vec<Value>,
}

impl RowSet {
    /// An empty set keyed by `key_field`.
    pub fn new(key_field: &str) -> Self {
        Self {
            key_field: key_field.to_owned(),
            rows: Vec::new(),
        }
    }

    /// The rows in insertion order.
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Replace the whole set, e.g. after a refetch.
    pub fn replace(&mut self, rows: Vec<Value>) {
        self.rows = rows;
    }

    /// Prepend a freshly created row so it is visible on page 1.
    pub fn add_row(&mut self, row: Value) {
        self.rows.insert(0, row);
    }

    /// Shallow-merge `patch`'s fields into the row with identity `key`.
    ///
    /// Top-level fields overwrite; nested objects are replaced whole, not
    /// merged. No row with that identity is a no-op.
    pub fn update_row(&mut self, key: &RowKey, patch: &Value) {
        let Some(patch) = patch.as_object() else {
            return;
        };

        let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| RowKey::resolve(row, &self.key_field) == *key)
        else {
            return;
        };

        if let Some(fields) = row.as_object_mut() {
            for (field, value) in patch {
                fields.insert(field.clone(), value.clone());
            }
        }
    }

    /// Remove the row with identity `key`, keeping the order of the rest.
    pub fn remove_row(&mut self, key: &RowKey) {
        self.rows
            .retain(|row| RowKey::resolve(row, &self.key_field) != *key);
    }

    /// Remove every row whose identity is in `keys`, e.g. after a bulk
    /// delete.
    pub fn remove_rows(&mut self, keys: &[RowKey]) {
        self.rows
            .retain(|row| !keys.contains(&RowKey::resolve(row, &self.key_field)));
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
