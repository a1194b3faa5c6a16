//! Per-embedding interaction state and the hooks it fires outward.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    config::TableConfig,
    filter::ActiveFilters,
    paging::Pagination,
    selection::{RowKey, Selection},
    sort::{SortConfig, SortDirection},
};

/// Callbacks into the embedding application.
///
/// Every hook is optional; an unset hook makes the corresponding event a
/// no-op outward. Hooks observe state transitions, they never veto them.
#[derive(Default)]
pub struct TableHooks {
    /// Fired after a user-driven selection change, with the selected
    /// rows in row-set order.
    pub on_selection_change: Option<Box<dyn Fn(&[&Value])>>,
    /// Fired when the active sort changes.
    pub on_sort: Option<Box<dyn Fn(&SortConfig)>>,
    /// Fired when filter state changes.
    pub on_filter: Option<Box<dyn Fn(&ActiveFilters)>>,
    /// Fired when the page or page size changes, with the new page and
    /// page size. Server-mode callers refetch from here.
    pub on_page_change: Option<Box<dyn Fn(u64, u64)>>,
    /// Fired when a row is activated.
    pub on_row_click: Option<Box<dyn Fn(&Value)>>,
    /// Replaces the built-in export when set; fired with the whole
    /// filtered set, not just the visible page.
    pub on_export: Option<Box<dyn Fn(&[Value])>>,
    /// Fired by the refresh button.
    pub on_refresh: Option<Box<dyn Fn()>>,
    /// Fired by the create button.
    pub on_create: Option<Box<dyn Fn()>>,
}

impl TableHooks {
    /// Hooks with nothing wired up.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mutable interaction state for one table embedding.
///
/// The raw search input and the applied term are distinct fields: the
/// input tracks every keystroke for display, while the applied term only
/// moves when the debouncer settles and is what the pipeline reads.
pub struct TableState {
    /// The search box's displayed contents.
    pub search_input: String,
    /// The settled term the pipeline filters by.
    pub applied_search: String,
    /// Active filter state.
    pub filters: ActiveFilters,
    /// The active sort, if any.
    pub sort: Option<SortConfig>,
    /// The 1-based page on display.
    pub current_page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// Selected row identities.
    pub selection: Selection,
    /// Identities of rows with their expansion panel open.
    pub expanded: HashSet<RowKey>,
    /// Whether the filter drawer is open.
    pub show_filters: bool,
    key_field: String,
    server_side: bool,
}

impl TableState {
    /// Initial state for `config`: default filters active, page 1, no
    /// sort, nothing selected.
    pub fn new(config: &TableConfig) -> Self {
        Self {
            search_input: String::new(),
            applied_search: String::new(),
            filters: config.default_filters.clone(),
            sort: None,
            current_page: 1,
            page_size: config.page_size,
            selection: Selection::new(),
            expanded: HashSet::new(),
            show_filters: false,
            key_field: config.key_field.clone(),
            server_side: config.server_side,
        }
    }

    /// Track a keystroke in the search box. The applied term is
    /// untouched until [`TableState::apply_search`].
    pub fn set_search_input(&mut self, text: &str) {
        self.search_input = text.to_owned();
    }

    /// Apply a settled search term and return to page 1.
    pub fn apply_search(&mut self, term: &str) {
        self.applied_search = term.to_owned();
        self.move_to_page_internal(1);
    }

    /// Toggle the sort on `key`: a new key sorts ascending, the active
    /// key flips direction.
    pub fn toggle_sort(&mut self, key: &str, hooks: &TableHooks) {
        let direction = match &self.sort {
            Some(sort) if sort.key == key => sort.direction.toggled(),
            _ => SortDirection::Asc,
        };

        let sort = SortConfig {
            key: key.to_owned(),
            direction,
        };

        if let Some(on_sort) = &hooks.on_sort {
            on_sort(&sort);
        }

        self.sort = Some(sort);
    }

    /// Set one filter value and return to page 1.
    pub fn set_filter(&mut self, key: &str, value: Value, hooks: &TableHooks) {
        self.filters.insert(key.to_owned(), value);
        self.move_to_page_internal(1);

        if let Some(on_filter) = &hooks.on_filter {
            on_filter(&self.filters);
        }
    }

    /// Drop every active filter and return to page 1.
    pub fn clear_filters(&mut self, hooks: &TableHooks) {
        self.filters.clear();
        self.move_to_page_internal(1);

        if let Some(on_filter) = &hooks.on_filter {
            on_filter(&self.filters);
        }
    }

    /// Navigate to `page`, clamped to the valid range.
    pub fn set_page(&mut self, page: u64, pagination: &Pagination, hooks: &TableHooks) {
        let page = page.clamp(1, pagination.total_pages);

        if page == self.current_page {
            return;
        }

        self.move_to_page_internal(page);

        if let Some(on_page_change) = &hooks.on_page_change {
            on_page_change(self.current_page, self.page_size);
        }
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, page_size: u64, hooks: &TableHooks) {
        self.page_size = page_size.max(1);
        self.move_to_page_internal(1);

        if let Some(on_page_change) = &hooks.on_page_change {
            on_page_change(self.current_page, self.page_size);
        }
    }

    /// Flip one row's selection and report the new selection outward.
    pub fn toggle_row(&mut self, row: &Value, rows: &[Value], hooks: &TableHooks) {
        self.selection.toggle(row, &self.key_field);
        self.emit_selection(rows, hooks);
    }

    /// Select or deselect every row on the current page and report the
    /// new selection outward.
    pub fn set_page_selected(
        &mut self,
        page_rows: &[Value],
        checked: bool,
        rows: &[Value],
        hooks: &TableHooks,
    ) {
        self.selection
            .set_page_selected(page_rows, &self.key_field, checked);
        self.emit_selection(rows, hooks);
    }

    /// Flip one row's expansion panel.
    pub fn toggle_expanded(&mut self, row: &Value) {
        let key = RowKey::resolve(row, &self.key_field);

        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    /// Whether `row`'s expansion panel is open.
    pub fn is_expanded(&self, row: &Value) -> bool {
        self.expanded
            .contains(&RowKey::resolve(row, &self.key_field))
    }

    /// Open or close the filter drawer.
    pub fn toggle_filter_drawer(&mut self) {
        self.show_filters = !self.show_filters;
    }

    /// Report a row activation outward.
    pub fn click_row(&self, row: &Value, hooks: &TableHooks) {
        if let Some(on_row_click) = &hooks.on_row_click {
            on_row_click(row);
        }
    }

    /// Hand the whole filtered set to the export hook.
    ///
    /// Returns false when no hook is wired, leaving the built-in
    /// CSV/JSON/print exports to the caller.
    pub fn request_export(&self, filtered: &[Value], hooks: &TableHooks) -> bool {
        match &hooks.on_export {
            Some(on_export) => {
                on_export(filtered);
                true
            }
            None => false,
        }
    }

    /// Report a refresh request outward.
    pub fn request_refresh(&self, hooks: &TableHooks) {
        if let Some(on_refresh) = &hooks.on_refresh {
            on_refresh();
        }
    }

    /// Report a create request outward.
    pub fn request_create(&self, hooks: &TableHooks) {
        if let Some(on_create) = &hooks.on_create {
            on_create();
        }
    }

    /// Whether `row` is selected.
    pub fn is_selected(&self, row: &Value) -> bool {
        self.selection.contains(row, &self.key_field)
    }

    /// The dotted path resolving row identities.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    // Page moves clear the selection in client mode so a bulk action can
    // never silently cover rows that scrolled out of view. The clear is
    // not reported outward.
    fn move_to_page_internal(&mut self, page: u64) {
        let changed = page != self.current_page;
        self.current_page = page;

        if changed && !self.server_side {
            self.selection.clear();
        }
    }

    fn emit_selection(&self, rows: &[Value], hooks: &TableHooks) {
        if let Some(on_selection_change) = &hooks.on_selection_change {
            let selected = self.selection.selected_rows(rows, &self.key_field);
            on_selection_change(&selected);
        }
    }
}
