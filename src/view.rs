//! The view pipeline: search, filter, sort, paginate, as a pure function
//! of row set and view state.

use std::hash::{DefaultHasher, Hash, Hasher};

use serde_json::Value;
use tracing::trace;

use crate::{
    column::Column,
    filter::{ActiveFilters, apply_filters, apply_search, searchable_fields},
    paging::Pagination,
    sort::{SortConfig, SortDirection, sort_rows},
};

/// Who runs the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMode {
    /// The engine searches, filters, sorts, and pages the supplied rows.
    Client,
    /// The caller has already done all of that; rows pass through
    /// untouched and the reported page metadata is echoed verbatim.
    Server(Pagination),
}

/// Everything the pipeline reads. Borrowed so building a query per render
/// is free.
#[derive(Debug)]
pub struct ViewQuery<'a> {
    /// The full row set.
    pub rows: &'a [Value],
    /// Column declarations, consulted for searchable fields.
    pub columns: &'a [Column],
    /// Explicit searchable field paths; empty derives them from columns.
    pub search_fields: &'a [String],
    /// The applied (settled) search term.
    pub search: &'a str,
    /// Active filter state.
    pub filters: &'a ActiveFilters,
    /// The active sort, if any.
    pub sort: Option<&'a SortConfig>,
    /// Requested 1-based page.
    pub page: u64,
    /// Requested rows per page.
    pub page_size: u64,
    /// Whether to slice the filtered set into pages at all.
    pub paginate: bool,
    /// Client or server mode.
    pub mode: TableMode,
}

/// The pipeline's output.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// The searched, filtered, sorted set, before paging. Exports and
    /// "select all" read this.
    pub filtered: Vec<Value>,
    /// The slice of `filtered` on display.
    pub page_rows: Vec<Value>,
    /// Page metadata for the strip.
    pub pagination: Pagination,
}

/// Run the pipeline.
///
/// Stages run in a fixed order: search narrows first, filters narrow
/// further, the sort reorders, and paging slices. In server mode every
/// stage is the caller's job and rows pass straight through.
pub fn compute_view(query: &ViewQuery) -> TableView {
    if let TableMode::Server(reported) = &query.mode {
        return TableView {
            filtered: query.rows.to_vec(),
            page_rows: query.rows.to_vec(),
            pagination: reported.clone(),
        };
    }

    let fields = searchable_fields(query.columns, query.search_fields);
    let refs = apply_search(query.rows.iter().collect(), query.search, &fields);
    let refs = apply_filters(refs, query.filters);
    let refs = sort_rows(refs, query.sort);

    let pagination = if query.paginate {
        Pagination::client(refs.len() as u64, query.page, query.page_size)
    } else {
        Pagination::single_page(refs.len() as u64)
    };

    let (start, end) = pagination.slice_bounds();
    let page_rows = refs[start..end].iter().map(|&row| row.clone()).collect();
    let filtered = refs.into_iter().cloned().collect();

    TableView {
        filtered,
        page_rows,
        pagination,
    }
}

/// Memoizes [`compute_view`] across renders.
///
/// The cache fingerprints the query's inputs, including the row slice's
/// address and length, so swapping in a new row set recomputes while
/// re-rendering unchanged state does not. Mutating rows in place behind
/// the same allocation is not detected; replace the row set instead.
#[derive(Debug, Default)]
pub struct ViewCache {
    fingerprint: Option<u64>,
    view: Option<TableView>,
    computations: u64,
}

impl ViewCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The view for `query`, recomputed only when the fingerprint
    /// changed since the previous call.
    pub fn view(&mut self, query: &ViewQuery) -> &TableView {
        let fingerprint = fingerprint(query);

        if self.fingerprint != Some(fingerprint) || self.view.is_none() {
            trace!("view cache miss, recomputing");
            self.view = Some(compute_view(query));
            self.fingerprint = Some(fingerprint);
            self.computations += 1;
        }

        self.view.as_ref().expect("view was just computed")
    }
}

fn fingerprint(query: &ViewQuery) -> u64 {
    let mut hasher = DefaultHasher::new();

    (query.rows.as_ptr() as usize).hash(&mut hasher);
    query.rows.len().hash(&mut hasher);
    query.search.hash(&mut hasher);

    for (key, value) in query.filters {
        key.hash(&mut hasher);
        value.to_string().hash(&mut hasher);
    }

    if let Some(sort) = query.sort {
        sort.key.hash(&mut hasher);
        matches!(sort.direction, SortDirection::Desc).hash(&mut hasher);
    }

    query.page.hash(&mut hasher);
    query.page_size.hash(&mut hasher);
    query.paginate.hash(&mut hasher);

    if let TableMode::Server(reported) = &query.mode {
        reported.current_page.hash(&mut hasher);
        reported.page_size.hash(&mut hasher);
        reported.total_items.hash(&mut hasher);
        reported.total_pages.hash(&mut hasher);
    }

    hasher.finish()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{
        column::Column,
        filter::ActiveFilters,
        paging::Pagination,
        sort::{SortConfig, SortDirection},
    };

    use super::{TableMode, ViewCache, ViewQuery, compute_view};

    fn people() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Alice", "age": 30, "status": "active"}),
            json!({"id": 2, "name": "bob", "age": 25, "status": "inactive"}),
            json!({"id": 3, "name": "Carol", "age": 41, "status": "active"}),
            json!({"id": 4, "name": "malia", "age": 22, "status": "pending"}),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("age", "Age").sortable().not_searchable(),
            Column::new("status", "Status"),
        ]
    }

    fn query_of<'a>(
        rows: &'a [Value],
        columns: &'a [Column],
        filters: &'a ActiveFilters,
        search: &'a str,
        sort: Option<&'a SortConfig>,
    ) -> ViewQuery<'a> {
        ViewQuery {
            rows,
            columns,
            search_fields: &[],
            search,
            filters,
            sort,
            page: 1,
            page_size: 25,
            paginate: true,
            mode: TableMode::Client,
        }
    }

    fn names(rows: &[Value]) -> Vec<String> {
        rows.iter()
            .map(|row| row["name"].as_str().unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn search_narrows_across_searchable_columns() {
        let rows = people();
        let columns = columns();
        let filters = ActiveFilters::new();

        let view = compute_view(&query_of(&rows, &columns, &filters, "ali", None));

        // "25" lives in an unsearchable column, "ali" hits two names.
        assert_eq!(vec!["Alice", "malia"], names(&view.filtered));
    }

    #[test]
    fn stages_compose_in_search_filter_sort_order() {
        let rows = people();
        let columns = columns();
        let mut filters = ActiveFilters::new();
        filters.insert("status".to_owned(), json!(["active", "pending"]));
        let sort = SortConfig {
            key: "age".to_owned(),
            direction: SortDirection::Desc,
        };

        let view = compute_view(&query_of(&rows, &columns, &filters, "a", Some(&sort)));

        assert_eq!(vec!["Carol", "Alice", "malia"], names(&view.filtered));
        assert_eq!(3, view.pagination.total_items);
    }

    #[test]
    fn paging_slices_the_filtered_set() {
        let rows = people();
        let columns = columns();
        let filters = ActiveFilters::new();

        let mut query = query_of(&rows, &columns, &filters, "", None);
        query.page_size = 3;
        query.page = 2;

        let view = compute_view(&query);

        assert_eq!(vec!["malia"], names(&view.page_rows));
        assert_eq!(4, view.filtered.len());
        assert_eq!(2, view.pagination.total_pages);
    }

    #[test]
    fn page_slices_concatenate_to_the_filtered_set() {
        let rows = people();
        let columns = columns();
        let filters = ActiveFilters::new();

        let mut reassembled = Vec::new();
        for page in 1..=2 {
            let mut query = query_of(&rows, &columns, &filters, "", None);
            query.page_size = 3;
            query.page = page;

            reassembled.extend(compute_view(&query).page_rows);
        }

        let whole = compute_view(&query_of(&rows, &columns, &filters, "", None));
        assert_eq!(whole.filtered, reassembled);
    }

    #[test]
    fn disabling_pagination_puts_everything_on_one_page() {
        let rows = people();
        let columns = columns();
        let filters = ActiveFilters::new();

        let mut query = query_of(&rows, &columns, &filters, "", None);
        query.paginate = false;
        query.page_size = 2;

        let view = compute_view(&query);

        assert_eq!(4, view.page_rows.len());
        assert_eq!(1, view.pagination.total_pages);
    }

    #[test]
    fn server_mode_passes_rows_through_and_echoes_metadata() {
        let rows = people();
        let columns = columns();
        let mut filters = ActiveFilters::new();
        filters.insert("status".to_owned(), json!("active"));
        let reported = Pagination {
            current_page: 7,
            page_size: 4,
            total_items: 250,
            total_pages: 63,
        };

        let mut query = query_of(&rows, &columns, &filters, "ignored", None);
        query.mode = TableMode::Server(reported.clone());

        let view = compute_view(&query);

        assert_eq!(4, view.page_rows.len());
        assert_eq!(reported, view.pagination);
    }

    #[test]
    fn cache_recomputes_only_when_inputs_change() {
        let rows = people();
        let columns = columns();
        let filters = ActiveFilters::new();
        let mut cache = ViewCache::new();

        cache.view(&query_of(&rows, &columns, &filters, "a", None));
        cache.view(&query_of(&rows, &columns, &filters, "a", None));

        assert_eq!(1, cache.computations);

        let filtered = names(&cache.view(&query_of(&rows, &columns, &filters, "bo", None)).filtered);

        assert_eq!(2, cache.computations);
        assert_eq!(vec!["bob"], filtered);
    }

    #[test]
    fn cache_detects_a_replaced_row_set() {
        let rows = people();
        let columns = columns();
        let filters = ActiveFilters::new();
        let mut cache = ViewCache::new();

        cache.view(&query_of(&rows, &columns, &filters, "", None));

        let replaced: Vec<Value> = rows[..2].to_vec();
        let filtered_len = cache
            .view(&query_of(&replaced, &columns, &filters, "", None))
            .filtered
            .len();

        assert_eq!(2, cache.computations);
        assert_eq!(2, filtered_len);
    }
}
