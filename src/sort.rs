//! Type-aware stable ordering of the filtered row set.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::path::get_path;

/// The direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Natural comparator order.
    Asc,
    /// Inverted comparator order.
    Desc,
}

impl SortDirection {
    /// The direction sorting flips to when the active column header is
    /// activated again.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The single active sort key and direction. At most one column sorts at
/// a time; there is no multi-column sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Dotted path of the sorted field.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

const ISO_DATE: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Epoch seconds for date-shaped strings: RFC 3339 date-times, or plain
/// ISO-8601 dates taken as midnight UTC. JSON has no date value, so this
/// is the engine's rendition of "both values are dates".
fn date_rank(value: &Value) -> Option<i64> {
    let text = value.as_str()?;

    if let Ok(datetime) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(datetime.unix_timestamp());
    }

    Date::parse(text, ISO_DATE)
        .ok()
        .map(|date| date.midnight().assume_utc().unix_timestamp())
}

/// Text form used by the string rule: empty for missing values, so they
/// rank lowest ascending.
fn string_rank(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
    }
}

/// Compare two resolved field values.
///
/// Rules in priority order: both date-shaped strings compare by epoch;
/// both numbers compare numerically; everything else compares by
/// lowercase string form. A date-shaped string paired with anything else
/// falls through to the string rule.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(a), Some(b)) = (a, b) {
        if let (Some(a_epoch), Some(b_epoch)) = (date_rank(a), date_rank(b)) {
            return a_epoch.cmp(&b_epoch);
        }

        if let (Value::Number(a_number), Value::Number(b_number)) = (a, b) {
            let a_number = a_number.as_f64().unwrap_or(0.0);
            let b_number = b_number.as_f64().unwrap_or(0.0);
            return a_number.partial_cmp(&b_number).unwrap_or(Ordering::Equal);
        }
    }

    string_rank(a).cmp(&string_rank(b))
}

/// Stable sort of `rows` by the active sort key.
///
/// No active key leaves the filtered order untouched. Equal keys keep
/// their relative order (`sort_by` is stable).
pub fn sort_rows<'a>(mut rows: Vec<&'a Value>, sort: Option<&SortConfig>) -> Vec<&'a Value> {
    let Some(sort) = sort else {
        return rows;
    };

    rows.sort_by(|a, b| {
        let ordering = compare_values(get_path(a, &sort.key), get_path(b, &sort.key));

        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    rows
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{SortConfig, SortDirection, sort_rows};

    fn sort_of(key: &str, direction: SortDirection) -> SortConfig {
        SortConfig {
            key: key.to_owned(),
            direction,
        }
    }

    fn names(rows: &[&Value]) -> Vec<String> {
        rows.iter()
            .map(|row| row["name"].as_str().unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn sorts_numbers_ascending_and_descending() {
        let rows = vec![
            json!({"id": 1, "name": "Alice", "age": 30}),
            json!({"id": 2, "name": "bob", "age": 25}),
        ];

        let asc = sort_rows(rows.iter().collect(), Some(&sort_of("age", SortDirection::Asc)));
        assert_eq!(vec!["bob", "Alice"], names(&asc));

        let desc = sort_rows(rows.iter().collect(), Some(&sort_of("age", SortDirection::Desc)));
        assert_eq!(vec!["Alice", "bob"], names(&desc));
    }

    #[test]
    fn strings_compare_case_insensitively() {
        let rows = vec![
            json!({"name": "zara"}),
            json!({"name": "Adam"}),
            json!({"name": "mia"}),
        ];

        let got = sort_rows(rows.iter().collect(), Some(&sort_of("name", SortDirection::Asc)));

        assert_eq!(vec!["Adam", "mia", "zara"], names(&got));
    }

    #[test]
    fn date_strings_compare_by_epoch_not_lexicographically() {
        let rows = vec![
            json!({"name": "late", "when": "2025-03-09T11:00:00Z"}),
            json!({"name": "early", "when": "2025-03-09T23:00:00+13:00"}),
        ];

        // Lexicographically "11:00:00Z" sorts before "23:00:00+13:00",
        // but with the offset applied the latter is the earlier instant
        // (10:00 UTC).
        let got = sort_rows(rows.iter().collect(), Some(&sort_of("when", SortDirection::Asc)));

        assert_eq!(vec!["early", "late"], names(&got));
    }

    #[test]
    fn plain_iso_dates_are_date_shaped() {
        let rows = vec![
            json!({"name": "b", "date": "2025-10-02"}),
            json!({"name": "a", "date": "2024-12-31"}),
        ];

        let got = sort_rows(rows.iter().collect(), Some(&sort_of("date", SortDirection::Asc)));

        assert_eq!(vec!["a", "b"], names(&got));
    }

    #[test]
    fn missing_values_rank_lowest_ascending() {
        let rows = vec![
            json!({"name": "with", "amount": "x"}),
            json!({"name": "without"}),
        ];

        let got = sort_rows(
            rows.iter().collect(),
            Some(&sort_of("amount", SortDirection::Asc)),
        );

        assert_eq!(vec!["without", "with"], names(&got));
    }

    #[test]
    fn equal_keys_preserve_original_relative_order() {
        let rows = vec![
            json!({"id": 1, "name": "first", "group": "a"}),
            json!({"id": 2, "name": "second", "group": "a"}),
            json!({"id": 3, "name": "third", "group": "a"}),
        ];

        let got = sort_rows(rows.iter().collect(), Some(&sort_of("group", SortDirection::Asc)));

        assert_eq!(vec!["first", "second", "third"], names(&got));
    }

    #[test]
    fn descending_reverses_ascending_for_a_total_order() {
        let rows = vec![
            json!({"name": "c", "rank": 3}),
            json!({"name": "a", "rank": 1}),
            json!({"name": "b", "rank": 2}),
        ];

        let asc = sort_rows(rows.iter().collect(), Some(&sort_of("rank", SortDirection::Asc)));
        let mut reversed = asc.clone();
        reversed.reverse();

        let desc = sort_rows(rows.iter().collect(), Some(&sort_of("rank", SortDirection::Desc)));

        assert_eq!(reversed, desc);
    }

    #[test]
    fn no_active_sort_leaves_order_untouched() {
        let rows = vec![json!({"name": "z"}), json!({"name": "a"})];

        let got = sort_rows(rows.iter().collect(), None);

        assert_eq!(vec!["z", "a"], names(&got));
    }

    #[test]
    fn direction_toggles() {
        assert_eq!(SortDirection::Desc, SortDirection::Asc.toggled());
        assert_eq!(SortDirection::Asc, SortDirection::Desc.toggled());
    }
}
