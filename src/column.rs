//! Column, filter, and stat-card declarations for the table surface.
//!
//! Declarations are purely descriptive: they carry no runtime state, so
//! they can be built once per embedding and shared between the view
//! pipeline, the export engine, and the render surface.

use serde::{Deserialize, Serialize};

/// Horizontal alignment hint for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnAlign {
    /// Left aligned (the default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned, typical for amounts.
    Right,
}

/// A column declaration.
///
/// `key` is a dotted path resolved against each row at render, sort, and
/// export time; nothing requires it to be a top-level field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Dotted path resolved against each row.
    pub key: String,
    /// Header label, also used as the CSV header.
    pub label: String,
    /// Whether the header offers sort toggling.
    #[serde(default)]
    pub sortable: bool,
    /// Whether a filter control may target this column.
    #[serde(default)]
    pub filterable: bool,
    /// Whether the text search scans this column. Defaults to true.
    #[serde(default = "default_searchable")]
    pub searchable: bool,
    /// Alignment hint for header and cells.
    #[serde(default)]
    pub align: ColumnAlign,
    /// CSS width hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Pin the column while scrolling horizontally.
    #[serde(default)]
    pub sticky: bool,
}

fn default_searchable() -> bool {
    true
}

impl Column {
    /// A plain left-aligned, searchable column.
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            sortable: false,
            filterable: false,
            searchable: true,
            align: ColumnAlign::Left,
            width: None,
            sticky: false,
        }
    }

    /// Enable sort toggling on this column's header.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Mark the column as a filter target.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Exclude the column from the text search scan.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Set the alignment hint.
    pub fn align(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }

    /// Set the CSS width hint.
    pub fn width(mut self, width: &str) -> Self {
        self.width = Some(width.to_owned());
        self
    }

    /// Pin the column while scrolling horizontally.
    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }
}

/// The kind of control a filter declaration renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Single-choice dropdown with an implicit "All" entry.
    Select,
    /// Multiple-choice list; the active value is an array.
    MultiSelect,
    /// Start/end date pair.
    ///
    /// The control writes two active-filter keys suffixed `_start` and
    /// `_end`. The filter engine applies plain equality to those derived
    /// keys and never interprets them as a range; callers wanting real
    /// range semantics must pre-filter the row set themselves.
    DateRange,
    /// Free text input.
    Text,
    /// Numeric input.
    Number,
}

/// One choice offered by a select or multiselect filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    /// The value written into active filter state when chosen.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Optional occurrence count shown next to the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl FilterOption {
    /// An option without a count.
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_owned(),
            label: label.to_owned(),
            count: None,
        }
    }

    /// Attach an occurrence count.
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

/// A filter declaration for the filter drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFilter {
    /// The active-filter key this control writes (dotted path for field
    /// filters).
    pub key: String,
    /// Display label above the control.
    pub label: String,
    /// The control kind.
    pub kind: FilterKind,
    /// Choices for select and multiselect kinds.
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl TableFilter {
    /// A filter declaration without options.
    pub fn new(key: &str, label: &str, kind: FilterKind) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            kind,
            options: Vec::new(),
        }
    }

    /// Attach the choices offered by a select or multiselect control.
    pub fn with_options(mut self, options: Vec<FilterOption>) -> Self {
        self.options = options;
        self
    }
}

/// Trend annotation on a stat card, e.g. "+12% vs last month".
#[derive(Debug, Clone, PartialEq)]
pub struct StatTrend {
    /// Percentage magnitude; displayed as an absolute value.
    pub value: f64,
    /// Whether the trend is rendered as positive (up, green).
    pub is_positive: bool,
}

/// A stat card shown in the strip above the table.
///
/// `value` is pre-formatted by the caller; [`crate::currency`] covers the
/// common finance case.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStat {
    /// Card label.
    pub label: String,
    /// The headline figure, already formatted.
    pub value: String,
    /// Smaller line under the figure.
    pub subtext: Option<String>,
    /// Optional trend annotation next to the figure.
    pub trend: Option<StatTrend>,
}

impl TableStat {
    /// A card with just a label and figure.
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_owned(),
            value: value.to_owned(),
            subtext: None,
            trend: None,
        }
    }

    /// Add the smaller line under the figure.
    pub fn with_subtext(mut self, subtext: &str) -> Self {
        self.subtext = Some(subtext.to_owned());
        self
    }

    /// Add a trend annotation.
    pub fn with_trend(mut self, value: f64, is_positive: bool) -> Self {
        self.trend = Some(StatTrend { value, is_positive });
        self
    }
}
