//! Tableur is a generic tabular data view engine for finance-style admin
//! and user surfaces.
//!
//! The engine consumes an opaque row array ([`serde_json::Value`] objects)
//! plus column and filter declarations, runs the
//! search → filter → sort → paginate pipeline as a pure function, and
//! exposes selection, export, and render surfaces outward. Data fetching,
//! routing, and authentication stay with the embedding application, which
//! supplies rows and consumes the emitted hooks.

#![warn(missing_docs)]

mod column;
mod config;
mod debounce;
mod export;
mod filter;
mod format;
mod html;
mod paging;
mod path;
mod persist;
mod render;
mod rows;
mod selection;
mod sort;
mod state;
mod view;
mod visibility;

pub use column::{Column, ColumnAlign, FilterKind, FilterOption, StatTrend, TableFilter, TableStat};
pub use config::TableConfig;
pub use debounce::Debouncer;
pub use export::{PrintSurface, print_document, print_table, to_csv, to_json};
pub use filter::{ActiveFilters, apply_filters, apply_search, searchable_fields};
pub use format::{count, currency};
pub use html::base;
pub use paging::{Pagination, PaginationIndicator, create_pagination_indicators};
pub use path::{get_path, set_path};
pub use persist::{
    MemoryStore, PreferenceStore, TablePreferences, load_preferences, reset_preferences,
    save_preferences,
};
pub use render::{TableSurface, data_table};
pub use rows::RowSet;
pub use selection::{RowKey, Selection};
pub use sort::{SortConfig, SortDirection, compare_values, sort_rows};
pub use state::{TableHooks, TableState};
pub use view::{TableMode, TableView, ViewCache, ViewQuery, compute_view};
pub use visibility::ColumnVisibility;

/// The errors that may occur in the engine.
///
/// Most of the engine is infallible by design: missing paths resolve to
/// no value, out-of-range pages clamp, and a blocked print surface is a
/// logged no-op. What remains are serialization failures, which indicate
/// a caller-side data contract violation and are surfaced as errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The row set could not be serialized as CSV.
    #[error("could not serialize as CSV: {0}")]
    CsvSerialization(String),

    /// The row set or preference state could not be serialized as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),

    /// The preference store rejected a save.
    ///
    /// The engine treats the storage medium as opaque; callers decide
    /// whether a failed save is worth surfacing to the user.
    #[error("failed to save table preferences: {0}")]
    PreferencesSave(String),
}
