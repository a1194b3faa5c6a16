//! Renders a table surface as markup.
//!
//! The markup is purely declarative: interactive elements carry `name`
//! and `data-*` attributes for the embedding to wire events to, and the
//! engine never emits behaviour beyond the self-printing export view.

use maud::{Markup, html};
use serde_json::{Value, json};

use crate::{
    column::{Column, ColumnAlign, FilterKind, TableFilter, TableStat},
    config::TableConfig,
    export::cell_text,
    filter::is_constraint,
    format::count,
    html::{
        BULK_BAR_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FILTER_DRAWER_STYLE,
        PAGINATION_STRIP_STYLE, SEARCH_INPUT_STYLE, STAT_CARD_STYLE, STAT_GRID_STYLE,
        TABLE_CELL_STYLE, TABLE_CONTAINER_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        TOOLBAR_STYLE,
    },
    paging::{PaginationIndicator, create_pagination_indicators},
    sort::SortDirection,
    state::TableState,
    view::TableView,
    visibility::ColumnVisibility,
};

const MAX_INDICATOR_PAGES: u64 = 5;

/// Everything one render of a table surface reads.
pub struct TableSurface<'a> {
    /// Heading above the table.
    pub title: &'a str,
    /// Smaller line under the heading.
    pub subtitle: Option<&'a str>,
    /// Column declarations, in display order.
    pub columns: &'a [Column],
    /// Filter declarations for the drawer.
    pub filters: &'a [TableFilter],
    /// Stat cards above the table.
    pub stats: &'a [TableStat],
    /// Feature flags and defaults.
    pub config: &'a TableConfig,
    /// Interaction state.
    pub state: &'a TableState,
    /// The computed view on display.
    pub view: &'a TableView,
    /// Hidden columns; `None` shows every column.
    pub visibility: Option<&'a ColumnVisibility>,
    /// Show the loading indicator instead of rows.
    pub loading: bool,
    /// Error banner text, when a fetch failed upstream.
    pub error: Option<&'a str>,
    /// Custom cell renderer; columns it returns `None` for fall back to
    /// the plain text form.
    pub cell: Option<&'a dyn Fn(&Value, &Column) -> Option<Markup>>,
    /// Expansion panel renderer for expandable tables.
    pub expansion: Option<&'a dyn Fn(&Value) -> Markup>,
}

impl TableSurface<'_> {
    fn visible_columns(&self) -> Vec<&Column> {
        match self.visibility {
            Some(visibility) => visibility.visible(self.columns),
            None => self.columns.iter().collect(),
        }
    }

    fn column_span(&self) -> usize {
        let mut span = self.visible_columns().len();

        if self.config.selectable {
            span += 1;
        }

        if self.config.expandable {
            span += 1;
        }

        span
    }

    fn active_filter_count(&self) -> usize {
        self.state
            .filters
            .values()
            .filter(|value| is_constraint(value))
            .count()
    }
}

/// Render the whole table surface: stat strip, toolbar, filter drawer,
/// bulk bar, table, and pagination strip.
pub fn data_table(surface: &TableSurface) -> Markup {
    html! {
        @if !surface.stats.is_empty() {
            (stat_cards(surface.stats))
        }

        div class=(TABLE_CONTAINER_STYLE) {
            (toolbar(surface))

            @if surface.state.show_filters && surface.config.filterable {
                (filter_drawer(surface))
            }

            @if surface.config.selectable && !surface.state.selection.is_empty() {
                div class=(BULK_BAR_STYLE) data-testid="bulk-bar" {
                    span { (surface.state.selection.len()) " selected" }
                }
            }

            @if let Some(error) = surface.error {
                div class="p-4 text-sm text-red-800 bg-red-50 dark:bg-red-900/30 dark:text-red-200"
                    role="alert" { (error) }
            }

            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                (table_head(surface))
                (table_body(surface))
            }

            @if surface.config.pagination {
                (pagination_strip(surface))
            }
        }
    }
}

fn stat_cards(stats: &[TableStat]) -> Markup {
    html! {
        div class=(STAT_GRID_STYLE) {
            @for stat in stats {
                div class=(STAT_CARD_STYLE) {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (stat.label) }
                    p class="text-2xl font-semibold" { (stat.value) }

                    @if let Some(trend) = &stat.trend {
                        @let class = if trend.is_positive {
                            "text-sm text-green-600 dark:text-green-400"
                        } else {
                            "text-sm text-red-600 dark:text-red-400"
                        };
                        @let arrow = if trend.is_positive { "▲" } else { "▼" };

                        p class=(class) { (arrow) " " (format!("{:.1}", trend.value.abs())) "%" }
                    }

                    @if let Some(subtext) = &stat.subtext {
                        p class="text-xs text-gray-500 dark:text-gray-400" { (subtext) }
                    }
                }
            }
        }
    }
}

fn toolbar(surface: &TableSurface) -> Markup {
    html! {
        div class=(TOOLBAR_STYLE) {
            div {
                h2 class="text-lg font-semibold text-gray-900 dark:text-white" { (surface.title) }

                @if let Some(subtitle) = surface.subtitle {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (subtitle) }
                }
            }

            div class="flex items-center gap-2" {
                @if surface.config.searchable {
                    input type="search" name="search" class=(SEARCH_INPUT_STYLE)
                        placeholder=(surface.config.search_placeholder)
                        value=(surface.state.search_input);
                }

                @if surface.config.filterable {
                    button type="button" name="toggle_filters" class=(BUTTON_SECONDARY_STYLE) {
                        "Filters"

                        @let active = surface.active_filter_count();
                        @if active > 0 {
                            span class="ml-1 px-1.5 text-xs rounded-full bg-blue-100 \
                                text-blue-800 dark:bg-blue-900 dark:text-blue-300" { (active) }
                        }
                    }
                }

                @if surface.config.exportable {
                    button type="button" name="export" class=(BUTTON_SECONDARY_STYLE) { "Export" }
                }

                @if surface.config.refreshable {
                    button type="button" name="refresh" class=(BUTTON_SECONDARY_STYLE) { "Refresh" }
                }

                @if surface.config.creatable {
                    button type="button" name="create" class=(BUTTON_PRIMARY_STYLE) {
                        (surface.config.create_label)
                    }
                }

                @if surface.loading {
                    span data-testid="loading" class="text-sm text-gray-500" { "Loading…" }
                }
            }
        }
    }
}

fn filter_drawer(surface: &TableSurface) -> Markup {
    html! {
        div class=(FILTER_DRAWER_STYLE) data-testid="filter-drawer" {
            @for filter in surface.filters {
                div {
                    label class="block mb-1 text-sm font-medium text-gray-900 dark:text-white" {
                        (filter.label)
                    }
                    (filter_control(filter, surface.state))
                }
            }

            div class="flex items-end" {
                button type="button" name="clear_filters" class=(BUTTON_SECONDARY_STYLE) {
                    "Clear filters"
                }
            }
        }
    }
}

fn filter_control(filter: &TableFilter, state: &TableState) -> Markup {
    let active = state.filters.get(&filter.key);

    match filter.kind {
        FilterKind::Select => html! {
            select name=(filter.key) class=(SEARCH_INPUT_STYLE) {
                option value="all" selected[active.is_none_or(|value| !is_constraint(value))] {
                    "All"
                }

                @for option in &filter.options {
                    option value=(option.value)
                        selected[active == Some(&json!(option.value))] {
                        (option.label)

                        @if let Some(count) = option.count {
                            " (" (count) ")"
                        }
                    }
                }
            }
        },
        FilterKind::MultiSelect => html! {
            div class="flex flex-col gap-1" {
                @for option in &filter.options {
                    @let checked = active
                        .and_then(Value::as_array)
                        .is_some_and(|values| values.contains(&json!(option.value)));

                    label class="flex items-center gap-2 text-sm" {
                        input type="checkbox" name=(filter.key) value=(option.value)
                            checked[checked];
                        (option.label)

                        @if let Some(count) = option.count {
                            span class="text-gray-500" { "(" (count) ")" }
                        }
                    }
                }
            }
        },
        FilterKind::DateRange => {
            let start_key = format!("{}_start", filter.key);
            let end_key = format!("{}_end", filter.key);
            let value_of = |key: &str| {
                state
                    .filters
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned()
            };

            html! {
                div class="flex gap-2" {
                    input type="date" name=(start_key) class=(SEARCH_INPUT_STYLE)
                        value=(value_of(&start_key));
                    input type="date" name=(end_key) class=(SEARCH_INPUT_STYLE)
                        value=(value_of(&end_key));
                }
            }
        }
        FilterKind::Text => html! {
            input type="text" name=(filter.key) class=(SEARCH_INPUT_STYLE)
                value=(active.and_then(Value::as_str).unwrap_or_default());
        },
        FilterKind::Number => html! {
            input type="number" name=(filter.key) class=(SEARCH_INPUT_STYLE)
                value=(active.map(Value::to_string).unwrap_or_default());
        },
    }
}

fn align_class(align: ColumnAlign) -> &'static str {
    match align {
        ColumnAlign::Left => "text-left",
        ColumnAlign::Center => "text-center",
        ColumnAlign::Right => "text-right",
    }
}

fn table_head(surface: &TableSurface) -> Markup {
    let state = surface.state;
    let page_rows = &surface.view.page_rows;
    let key_field = state.key_field();

    html! {
        thead class=(TABLE_HEADER_STYLE) {
            tr {
                @if surface.config.selectable {
                    th scope="col" class=(TABLE_CELL_STYLE) {
                        input type="checkbox" name="select_page"
                            checked[state.selection.is_all_selected(page_rows, key_field)]
                            data-indeterminate[state.selection.is_some_selected(page_rows, key_field)];
                    }
                }

                @if surface.config.expandable {
                    th scope="col" class=(TABLE_CELL_STYLE) {}
                }

                @for column in surface.visible_columns() {
                    @let sortable = surface.config.sortable && column.sortable;
                    @let sorted = state.sort.as_ref().filter(|sort| sort.key == column.key);

                    th scope="col"
                        class=(format!("{TABLE_CELL_STYLE} {}", align_class(column.align)))
                        data-sort-key=[sortable.then_some(&column.key)] {
                        (column.label)

                        @if let Some(sort) = sorted {
                            span data-testid="sort-indicator" {
                                @match sort.direction {
                                    SortDirection::Asc => { " ▲" }
                                    SortDirection::Desc => { " ▼" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn table_body(surface: &TableSurface) -> Markup {
    let state = surface.state;
    let key_field = state.key_field();
    let visible = surface.visible_columns();

    html! {
        tbody {
            @if surface.view.page_rows.is_empty() {
                tr {
                    td class="px-6 py-8 text-center" colspan=(surface.column_span()) {
                        (surface.config.empty_message)
                    }
                }
            }

            @for row in &surface.view.page_rows {
                @let row_key = cell_text(row, key_field);

                tr class=(TABLE_ROW_STYLE) data-row-key=(row_key) {
                    @if surface.config.selectable {
                        td class=(TABLE_CELL_STYLE) {
                            input type="checkbox" name="select_row" value=(row_key)
                                checked[state.is_selected(row)];
                        }
                    }

                    @if surface.config.expandable {
                        td class=(TABLE_CELL_STYLE) {
                            button type="button" name="toggle_expand" value=(row_key) {
                                @if state.is_expanded(row) { "▾" } @else { "▸" }
                            }
                        }
                    }

                    @for column in &visible {
                        td class=(format!("{TABLE_CELL_STYLE} {}", align_class(column.align))) {
                            @let custom = surface.cell.and_then(|cell| cell(row, column));

                            @if let Some(markup) = custom {
                                (markup)
                            } @else {
                                (cell_text(row, &column.key))
                            }
                        }
                    }
                }

                @if surface.config.expandable && state.is_expanded(row) {
                    @if let Some(expansion) = surface.expansion {
                        tr data-testid="expansion" {
                            td class=(TABLE_CELL_STYLE) colspan=(surface.column_span()) {
                                (expansion(row))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn pagination_strip(surface: &TableSurface) -> Markup {
    let pagination = &surface.view.pagination;
    let indicators = create_pagination_indicators(pagination, MAX_INDICATOR_PAGES);

    html! {
        div class=(PAGINATION_STRIP_STYLE) {
            span data-testid="entry-summary" {
                "Showing " (count(pagination.first_entry()))
                " to " (count(pagination.last_entry()))
                " of " (count(pagination.total_items)) " entries"
            }

            div class="flex items-center gap-2" {
                select name="page_size" class=(SEARCH_INPUT_STYLE) {
                    @for option in &surface.config.page_size_options {
                        option value=(option) selected[*option == surface.state.page_size] {
                            (option) " per page"
                        }
                    }
                }

                nav class="inline-flex gap-1" {
                    @for indicator in &indicators {
                        @match indicator {
                            PaginationIndicator::BackButton(page) => {
                                button type="button" name="page" value=(page)
                                    class=(BUTTON_SECONDARY_STYLE) { "Previous" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                button type="button" name="page" value=(page)
                                    class=(BUTTON_SECONDARY_STYLE) { "Next" }
                            }
                            PaginationIndicator::Page(page) => {
                                button type="button" name="page" value=(page)
                                    class=(BUTTON_SECONDARY_STYLE) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                button type="button" name="page" value=(page)
                                    aria-current="page" class=(BUTTON_PRIMARY_STYLE) { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-2" { "…" }
                            }
                        }
                    }
                }
            }
        }
    }
}
