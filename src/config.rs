//! Table configuration supplied by the embedding application.

use std::time::Duration;

use crate::filter::ActiveFilters;

/// Feature flags and defaults for one table embedding.
///
/// Everything here is fixed for the lifetime of the embedding; per-render
/// state lives in [`crate::TableState`].
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Dotted path resolving each row's identity. The resolved value must
    /// be stable and unique across the row set for selection and update
    /// semantics to hold.
    pub key_field: String,
    /// Show the search box and run the search stage.
    pub searchable: bool,
    /// Show the filter drawer and run the filter stage.
    pub filterable: bool,
    /// Allow sort toggling on sortable columns.
    pub sortable: bool,
    /// Show per-row checkboxes and the bulk-action bar.
    pub selectable: bool,
    /// Show per-row expansion toggles.
    pub expandable: bool,
    /// Show the export button.
    pub exportable: bool,
    /// Show the refresh button.
    pub refreshable: bool,
    /// Show the create button.
    pub creatable: bool,
    /// Slice the view into pages. When false the whole filtered set is
    /// one page.
    pub pagination: bool,
    /// Rows per page before the user chooses otherwise.
    pub page_size: u64,
    /// Choices offered by the page-size selector.
    pub page_size_options: Vec<u64>,
    /// The caller owns filtering, sorting, and paging; rows pass through
    /// untouched and page metadata is reported verbatim.
    pub server_side: bool,
    /// Quiet window before a typed search term is applied.
    pub search_debounce: Duration,
    /// Explicit searchable field paths; empty derives them from columns.
    pub search_fields: Vec<String>,
    /// Filters active before any user interaction.
    pub default_filters: ActiveFilters,
    /// Placeholder text in the search box.
    pub search_placeholder: String,
    /// Message shown when the view is empty.
    pub empty_message: String,
    /// Label on the create button.
    pub create_label: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            key_field: "id".to_owned(),
            searchable: true,
            filterable: true,
            sortable: true,
            selectable: false,
            expandable: false,
            exportable: false,
            refreshable: false,
            creatable: false,
            pagination: true,
            page_size: 25,
            page_size_options: vec![10, 25, 50, 100],
            server_side: false,
            search_debounce: Duration::from_millis(300),
            search_fields: Vec::new(),
            default_filters: ActiveFilters::new(),
            search_placeholder: "Search...".to_owned(),
            empty_message: "No data available".to_owned(),
            create_label: "Add New".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::TableConfig;

    #[test]
    fn defaults_match_the_documented_embedding_contract() {
        let config = TableConfig::default();

        assert_eq!("id", config.key_field);
        assert_eq!(25, config.page_size);
        assert_eq!(vec![10, 25, 50, 100], config.page_size_options);
        assert_eq!(Duration::from_millis(300), config.search_debounce);
        assert!(config.searchable);
        assert!(!config.selectable);
        assert!(!config.server_side);
    }
}
