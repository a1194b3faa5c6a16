//! Persists per-table view preferences across sessions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, filter::ActiveFilters, sort::SortConfig};

/// The view state worth restoring next session. Transient state such as
/// the current page, search term, and selection is deliberately not
/// persisted.
///
/// Every field defaults, so preferences written by an older build still
/// load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablePreferences {
    /// Active filter state to restore.
    #[serde(default)]
    pub filters: ActiveFilters,
    /// The active sort to restore.
    #[serde(default)]
    pub sort: Option<SortConfig>,
    /// Chosen page size, when the user moved off the default.
    #[serde(default)]
    pub page_size: Option<u64>,
    /// Keys of hidden columns.
    #[serde(default)]
    pub hidden_columns: Vec<String>,
}

/// Where preference blobs live: browser local storage behind a WASM
/// shim, a file, or memory in tests. The medium is opaque to the engine.
pub trait PreferenceStore {
    /// The blob stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), String>;

    /// Drop whatever is stored under `key`.
    fn remove(&mut self, key: &str);
}

/// Serialize `preferences` and store them under `key`.
pub fn save_preferences(
    store: &mut dyn PreferenceStore,
    key: &str,
    preferences: &TablePreferences,
) -> Result<(), Error> {
    let blob = serde_json::to_string(preferences)
        .map_err(|error| Error::JsonSerialization(error.to_string()))?;

    store
        .save(key, &blob)
        .map_err(Error::PreferencesSave)
}

/// Load the preferences stored under `key`.
///
/// Nothing stored, or a blob that no longer parses, yields the defaults;
/// a stale blob must never wedge the table.
pub fn load_preferences(store: &dyn PreferenceStore, key: &str) -> TablePreferences {
    let Some(blob) = store.load(key) else {
        return TablePreferences::default();
    };

    match serde_json::from_str(&blob) {
        Ok(preferences) => preferences,
        Err(error) => {
            debug!("discarding unparseable preferences under {key:?}: {error}");
            TablePreferences::default()
        }
    }
}

/// Drop the preferences stored under `key`.
pub fn reset_preferences(store: &mut dyn PreferenceStore, key: &str) {
    store.remove(key);
}

/// An in-memory store for tests and ephemeral embeddings.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        Error,
        filter::ActiveFilters,
        sort::{SortConfig, SortDirection},
    };

    use super::{
        MemoryStore, PreferenceStore, TablePreferences, load_preferences, reset_preferences,
        save_preferences,
    };

    fn preferences() -> TablePreferences {
        let mut filters = ActiveFilters::new();
        filters.insert("status".to_owned(), json!("active"));

        TablePreferences {
            filters,
            sort: Some(SortConfig {
                key: "date".to_owned(),
                direction: SortDirection::Desc,
            }),
            page_size: Some(50),
            hidden_columns: vec!["notes".to_owned()],
        }
    }

    #[test]
    fn saved_preferences_load_back_unchanged() {
        let mut store = MemoryStore::new();
        let want = preferences();

        save_preferences(&mut store, "transactions-table", &want).unwrap();
        let got = load_preferences(&store, "transactions-table");

        assert_eq!(want, got);
    }

    #[test]
    fn nothing_stored_yields_defaults() {
        let store = MemoryStore::new();

        let got = load_preferences(&store, "transactions-table");

        assert_eq!(TablePreferences::default(), got);
    }

    #[test]
    fn unparseable_blob_yields_defaults_instead_of_failing() {
        let mut store = MemoryStore::new();
        store.save("transactions-table", "{not json").unwrap();

        let got = load_preferences(&store, "transactions-table");

        assert_eq!(TablePreferences::default(), got);
    }

    #[test]
    fn missing_fields_in_an_old_blob_default() {
        let mut store = MemoryStore::new();
        store
            .save("transactions-table", r#"{"page_size": 10}"#)
            .unwrap();

        let got = load_preferences(&store, "transactions-table");

        assert_eq!(Some(10), got.page_size);
        assert!(got.filters.is_empty());
        assert_eq!(None, got.sort);
    }

    #[test]
    fn reset_drops_the_stored_blob() {
        let mut store = MemoryStore::new();
        save_preferences(&mut store, "transactions-table", &preferences()).unwrap();

        reset_preferences(&mut store, "transactions-table");

        assert_eq!(
            TablePreferences::default(),
            load_preferences(&store, "transactions-table")
        );
    }

    struct RefusingStore;

    impl PreferenceStore for RefusingStore {
        fn load(&self, _key: &str) -> Option<String> {
            None
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), String> {
            Err("quota exceeded".to_owned())
        }

        fn remove(&mut self, _key: &str) {}
    }

    #[test]
    fn a_refused_save_surfaces_as_an_error() {
        let mut store = RefusingStore;

        let got = save_preferences(&mut store, "transactions-table", &preferences());

        assert_eq!(
            Err(Error::PreferencesSave("quota exceeded".to_owned())),
            got
        );
    }
}
