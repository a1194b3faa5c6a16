//! Search and per-field filtering over the row set.
//!
//! Both stages run only in client mode; in server mode the caller filters
//! and rows pass through untouched. The stages borrow rows and preserve
//! their relative order, so the sort stage downstream stays stable.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{column::Column, path::get_path};

/// Active filter state: filter key to constraint value.
///
/// A `daterange` control writes two derived keys suffixed `_start` and
/// `_end`; they are ordinary entries here with plain equality semantics.
/// `Null`, the empty string, and `"all"` mean "no constraint".
pub type ActiveFilters = BTreeMap<String, Value>;

/// Whether `value` constrains the row set at all.
pub(crate) fn is_constraint(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty() && text != "all",
        _ => true,
    }
}

/// The text form a value presents to the search scan.
///
/// `None` never matches: missing fields, nulls, and objects are invisible
/// to search. Arrays join their elements' text with commas.
fn search_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(search_text).collect();
            Some(parts.join(","))
        }
    }
}

/// The field paths scanned by search: the explicit list when given,
/// otherwise every column not marked `searchable: false`.
pub fn searchable_fields(columns: &[Column], search_fields: &[String]) -> Vec<String> {
    if !search_fields.is_empty() {
        return search_fields.to_vec();
    }

    columns
        .iter()
        .filter(|column| column.searchable)
        .map(|column| column.key.clone())
        .collect()
}

/// Retain rows where any searchable field contains `term`,
/// case-insensitively. An empty term after trimming retains everything.
pub fn apply_search<'a>(rows: Vec<&'a Value>, term: &str, fields: &[String]) -> Vec<&'a Value> {
    let term = term.trim().to_lowercase();

    if term.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| {
            fields.iter().any(|field| {
                get_path(row, field)
                    .and_then(search_text)
                    .is_some_and(|text| text.to_lowercase().contains(&term))
            })
        })
        .collect()
}

/// Whether the resolved field value satisfies a single constraint.
fn matches_constraint(row_value: Option<&Value>, constraint: &Value) -> bool {
    match constraint {
        Value::Array(values) if !values.is_empty() => {
            row_value.is_some_and(|value| values.contains(value))
        }
        // An empty multiselect matches nothing.
        Value::Array(_) => false,
        Value::String(text) if text.eq_ignore_ascii_case("true") => {
            row_value == Some(&Value::Bool(true))
        }
        Value::String(text) if text.eq_ignore_ascii_case("false") => {
            row_value == Some(&Value::Bool(false))
        }
        other => row_value == Some(other),
    }
}

/// Retain rows satisfying every active filter, AND-composed.
///
/// Keys whose value is no constraint are skipped, so a filter drawer can
/// leave `""`/`"all"` entries behind without affecting the view.
pub fn apply_filters<'a>(rows: Vec<&'a Value>, filters: &ActiveFilters) -> Vec<&'a Value> {
    rows.into_iter()
        .filter(|row| {
            filters.iter().all(|(key, constraint)| {
                if !is_constraint(constraint) {
                    return true;
                }

                matches_constraint(get_path(row, key), constraint)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::column::Column;

    use super::{ActiveFilters, apply_filters, apply_search, searchable_fields};

    fn people() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Alice", "age": 30, "status": "active", "verified": true}),
            json!({"id": 2, "name": "bob", "age": 25, "status": "inactive", "verified": false}),
            json!({"id": 3, "name": "Carol", "age": 41, "status": "pending", "verified": true}),
        ]
    }

    fn name_field() -> Vec<String> {
        vec!["name".to_owned()]
    }

    #[test]
    fn search_matches_case_insensitive_substring() {
        let rows = people();

        let got = apply_search(rows.iter().collect(), "ali", &name_field());

        assert_eq!(1, got.len());
        assert_eq!(json!(1), got[0]["id"]);
    }

    #[test]
    fn empty_search_after_trimming_retains_everything() {
        let rows = people();

        let got = apply_search(rows.iter().collect(), "   ", &name_field());

        assert_eq!(3, got.len());
    }

    #[test]
    fn search_result_is_subset_of_unsearched_result() {
        let rows = people();
        let all: Vec<&Value> = rows.iter().collect();

        for term in ["a", "bo", "zzz", "Alice"] {
            let got = apply_search(all.clone(), term, &name_field());

            for row in &got {
                assert!(all.contains(row), "search {term:?} produced a new row");
            }
        }
    }

    #[test]
    fn search_scans_numbers_through_their_text_form() {
        let rows = people();
        let fields = vec!["age".to_owned()];

        let got = apply_search(rows.iter().collect(), "41", &fields);

        assert_eq!(1, got.len());
        assert_eq!(json!("Carol"), got[0]["name"]);
    }

    #[test]
    fn rows_with_null_searchable_fields_never_match() {
        let rows = vec![json!({"id": 1, "name": null}), json!({"id": 2})];

        let got = apply_search(rows.iter().collect(), "anything", &name_field());

        assert!(got.is_empty());
    }

    #[test]
    fn searchable_fields_derive_from_columns_unless_explicit() {
        let columns = vec![
            Column::new("name", "Name"),
            Column::new("secret", "Secret").not_searchable(),
        ];

        let derived = searchable_fields(&columns, &[]);
        assert_eq!(vec!["name".to_owned()], derived);

        let explicit = searchable_fields(&columns, &["secret".to_owned()]);
        assert_eq!(vec!["secret".to_owned()], explicit);
    }

    #[test]
    fn multiselect_filter_retains_member_rows() {
        let rows = people();
        let mut filters = ActiveFilters::new();
        filters.insert("status".to_owned(), json!(["active", "pending"]));

        let got = apply_filters(rows.iter().collect(), &filters);

        let statuses: Vec<&Value> = got.iter().map(|row| &row["status"]).collect();
        assert_eq!(vec![&json!("active"), &json!("pending")], statuses);
    }

    #[test]
    fn empty_multiselect_matches_nothing() {
        let rows = people();
        let mut filters = ActiveFilters::new();
        filters.insert("status".to_owned(), json!([]));

        let got = apply_filters(rows.iter().collect(), &filters);

        assert!(got.is_empty());
    }

    #[test]
    fn boolean_strings_coerce_to_strict_boolean_equality() {
        let rows = people();
        let mut filters = ActiveFilters::new();
        filters.insert("verified".to_owned(), json!("True"));

        let got = apply_filters(rows.iter().collect(), &filters);

        assert_eq!(2, got.len());
        assert!(got.iter().all(|row| row["verified"] == json!(true)));
    }

    #[test]
    fn scalar_filter_is_exact_equality() {
        let rows = people();
        let mut filters = ActiveFilters::new();
        filters.insert("age".to_owned(), json!(25));

        let got = apply_filters(rows.iter().collect(), &filters);

        assert_eq!(1, got.len());
        assert_eq!(json!("bob"), got[0]["name"]);
    }

    #[test]
    fn all_and_empty_string_are_no_constraint() {
        let rows = people();
        let mut filters = ActiveFilters::new();
        filters.insert("status".to_owned(), json!("all"));
        filters.insert("name".to_owned(), json!(""));

        let got = apply_filters(rows.iter().collect(), &filters);

        assert_eq!(3, got.len());
    }

    #[test]
    fn filters_compose_with_logical_and() {
        let rows = people();
        let mut filters = ActiveFilters::new();
        filters.insert("verified".to_owned(), json!("true"));
        filters.insert("status".to_owned(), json!(["active", "inactive"]));

        let got = apply_filters(rows.iter().collect(), &filters);

        assert_eq!(1, got.len());
        assert_eq!(json!("Alice"), got[0]["name"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let rows = people();
        let mut filters = ActiveFilters::new();
        filters.insert("status".to_owned(), json!(["active", "pending"]));

        let once = apply_filters(rows.iter().collect(), &filters);
        let twice = apply_filters(once.clone(), &filters);

        assert_eq!(once, twice);
    }

    #[test]
    fn daterange_derived_keys_get_plain_equality_not_range_semantics() {
        let rows = vec![
            json!({"id": 1, "date": "2025-03-01"}),
            json!({"id": 2, "date": "2025-03-15"}),
        ];
        let mut filters = ActiveFilters::new();
        filters.insert("date_start".to_owned(), json!("2025-03-01"));

        // The derived key names a field no row has, so equality filters
        // everything out; the engine does not interpret ranges.
        let got = apply_filters(rows.iter().collect(), &filters);

        assert!(got.is_empty());
    }

    #[test]
    fn nested_path_filters_resolve_through_the_accessor() {
        let rows = vec![
            json!({"id": 1, "user": {"role": "admin"}}),
            json!({"id": 2, "user": {"role": "member"}}),
        ];
        let mut filters = ActiveFilters::new();
        filters.insert("user.role".to_owned(), json!("admin"));

        let got = apply_filters(rows.iter().collect(), &filters);

        assert_eq!(1, got.len());
        assert_eq!(json!(1), got[0]["id"]);
    }
}
