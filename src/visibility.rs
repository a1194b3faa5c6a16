//! Per-embedding column visibility.

use std::collections::HashSet;

use crate::column::Column;

/// Tracks which columns are hidden.
///
/// Stored as the hidden set rather than the visible one, so newly
/// declared columns default to visible without migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    hidden: HashSet<String>,
}

impl ColumnVisibility {
    /// Everything visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted hidden keys.
    pub fn restore(hidden_keys: Vec<String>) -> Self {
        Self {
            hidden: hidden_keys.into_iter().collect(),
        }
    }

    /// Whether the column with `key` is hidden.
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    /// Flip one column's visibility.
    pub fn toggle(&mut self, key: &str) {
        if !self.hidden.remove(key) {
            self.hidden.insert(key.to_owned());
        }
    }

    /// Hide one column.
    pub fn hide(&mut self, key: &str) {
        self.hidden.insert(key.to_owned());
    }

    /// Show every column again.
    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    /// The visible subset of `columns`, in declaration order.
    pub fn visible<'a>(&self, columns: &'a [Column]) -> Vec<&'a Column> {
        columns
            .iter()
            .filter(|column| !self.is_hidden(&column.key))
            .collect()
    }

    /// The hidden keys, sorted for stable persistence.
    pub fn hidden_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.hidden.iter().cloned().collect();
        keys.sort();
        keys
    }
}
