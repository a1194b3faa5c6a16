//! Exports the current filtered row set as CSV, JSON, or a print view.
//!
//! Exports always cover the whole filtered set, not just the visible
//! page, and resolve cells through the same dotted-path accessor as the
//! table body.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::Value;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tracing::debug;

use crate::{Error, column::Column, path::get_path};

const PRINT_TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const PRINT_STYLE: &str = "\
    body { font-family: sans-serif; margin: 2rem; } \
    h1 { font-size: 1.25rem; } \
    table { width: 100%; border-collapse: collapse; margin-top: 1rem; } \
    th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; } \
    th { background-color: #f3f4f6; }";

/// The text a cell contributes to CSV and print output.
///
/// Missing fields and nulls become the empty string; zeros and `false`
/// keep their text forms. Arrays and objects fall back to their JSON
/// text so no data silently disappears from an export.
pub(crate) fn cell_text(row: &Value, key: &str) -> String {
    match get_path(row, key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    }
}

/// The CSV header labels and the field paths behind them: the declared
/// columns, or the first row's object keys when no columns are given.
fn header_and_keys(rows: &[Value], columns: &[Column]) -> (Vec<String>, Vec<String>) {
    if !columns.is_empty() {
        return (
            columns.iter().map(|column| column.label.clone()).collect(),
            columns.iter().map(|column| column.key.clone()).collect(),
        );
    }

    let keys: Vec<String> = rows
        .first()
        .and_then(Value::as_object)
        .map(|fields| fields.keys().cloned().collect())
        .unwrap_or_default();

    (keys.clone(), keys)
}

/// Serialize `rows` as CSV with one header row of column labels. Without
/// column declarations the first row's object keys stand in for both
/// header and fields; no rows at all yields empty output.
///
/// Quoting follows RFC 4180: fields containing commas, quotes, or line
/// breaks are quoted, with embedded quotes doubled.
pub fn to_csv(rows: &[Value], columns: &[Column]) -> Result<String, Error> {
    let (header, keys) = header_and_keys(rows, columns);

    if header.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&header)
        .map_err(|error| Error::CsvSerialization(error.to_string()))?;

    for row in rows {
        writer
            .write_record(keys.iter().map(|key| cell_text(row, key)))
            .map_err(|error| Error::CsvSerialization(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvSerialization(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvSerialization(error.to_string()))
}

/// Serialize `rows` as a pretty-printed JSON array of the raw row
/// objects, untouched by column declarations.
pub fn to_json(rows: &[Value]) -> Result<String, Error> {
    serde_json::to_string_pretty(rows).map_err(|error| Error::JsonSerialization(error.to_string()))
}

/// Where a print document is opened, typically a popup window or a
/// headless sink in tests.
///
/// Returns false when the surface refused the document, e.g. a popup
/// blocker.
pub trait PrintSurface {
    /// Present `document` for printing.
    fn open(&mut self, document: &str) -> bool;
}

/// The standalone print document: title, generation timestamp, and the
/// full filtered set as a plain table that prints itself on load.
pub fn print_document(title: &str, rows: &[Value], columns: &[Column]) -> Markup {
    let generated = OffsetDateTime::now_utc()
        .format(PRINT_TIMESTAMP_FORMAT)
        .unwrap_or_default();

    html! {
        (DOCTYPE)
        html {
            head {
                title { (title) }
                style { (PreEscaped(PRINT_STYLE)) }
            }
            body {
                h1 { (title) }
                p { "Generated on " (generated) }
                table {
                    thead {
                        tr {
                            @for column in columns {
                                th { (column.label) }
                            }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                @for column in columns {
                                    td { (cell_text(row, &column.key)) }
                                }
                            }
                        }
                    }
                }
                script { (PreEscaped("window.onload = () => window.print();")) }
            }
        }
    }
}

/// Render the print document and hand it to `surface`.
///
/// A refused document is a logged no-op, matching how blocked popups
/// behave in a browser.
pub fn print_table(
    surface: &mut dyn PrintSurface,
    title: &str,
    rows: &[Value],
    columns: &[Column],
) {
    let document = print_document(title, rows, columns).into_string();

    if !surface.open(&document) {
        debug!("print surface refused the document for {title:?}");
    }
}
