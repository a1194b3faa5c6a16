//! Row selection keyed by each row's identity value.

use std::collections::HashSet;

use serde_json::Value;

use crate::path::get_path;

/// A row's identity value, resolved through the configured key field.
///
/// Scalar identities hash directly. An array or object identity is
/// degenerate but tolerated by falling back to its JSON text, so such
/// rows remain individually selectable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// The key field was missing or null.
    Null,
    /// A boolean identity.
    Bool(bool),
    /// A numeric identity.
    Number(serde_json::Number),
    /// A string identity, or the JSON text of a non-scalar one.
    Text(String),
}

impl RowKey {
    /// Resolve `row`'s identity through the dotted `key_field` path.
    pub fn resolve(row: &Value, key_field: &str) -> Self {
        match get_path(row, key_field) {
            None | Some(Value::Null) => Self::Null,
            Some(Value::Bool(flag)) => Self::Bool(*flag),
            Some(Value::Number(number)) => Self::Number(number.clone()),
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(other) => Self::Text(other.to_string()),
        }
    }
}

/// The set of selected row identities.
///
/// Selection stores identities rather than row indices so it survives
/// re-sorting and re-filtering of the row set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: HashSet<RowKey>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `row` is selected.
    pub fn contains(&self, row: &Value, key_field: &str) -> bool {
        self.keys.contains(&RowKey::resolve(row, key_field))
    }

    /// Flip `row`'s membership.
    pub fn toggle(&mut self, row: &Value, key_field: &str) {
        let key = RowKey::resolve(row, key_field);

        if !self.keys.remove(&key) {
            self.keys.insert(key);
        }
    }

    /// Select or deselect every row on the current page. Rows on other
    /// pages keep their state.
    pub fn set_page_selected(&mut self, page_rows: &[Value], key_field: &str, checked: bool) {
        for row in page_rows {
            let key = RowKey::resolve(row, key_field);

            if checked {
                self.keys.insert(key);
            } else {
                self.keys.remove(&key);
            }
        }
    }

    /// Whether every row of a non-empty page is selected. Drives the
    /// header checkbox's checked state.
    pub fn is_all_selected(&self, page_rows: &[Value], key_field: &str) -> bool {
        !page_rows.is_empty()
            && page_rows
                .iter()
                .all(|row| self.contains(row, key_field))
    }

    /// Whether some but not all page rows are selected. Drives the header
    /// checkbox's indeterminate state.
    pub fn is_some_selected(&self, page_rows: &[Value], key_field: &str) -> bool {
        page_rows.iter().any(|row| self.contains(row, key_field))
            && !self.is_all_selected(page_rows, key_field)
    }

    /// The selected rows out of `rows`, in row-set order.
    pub fn selected_rows<'a>(&self, rows: &'a [Value], key_field: &str) -> Vec<&'a Value> {
        rows.iter()
            .filter(|row| self.contains(row, key_field))
            .collect()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Number of selected identities.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
