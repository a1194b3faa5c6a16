//! Shared style constants and the page shell for table surfaces.

use maud::{DOCTYPE, Markup, html};

// Table styles
pub(crate) const TABLE_CONTAINER_STYLE: &str = "relative overflow-x-auto shadow-md sm:rounded-lg \
    bg-white dark:bg-gray-800";

pub(crate) const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub(crate) const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub(crate) const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Button styles
pub(crate) const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub(crate) const BUTTON_SECONDARY_STYLE: &str = "py-2 px-4 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 \
    hover:text-blue-700 dark:bg-gray-800 dark:text-gray-400 dark:border-gray-600 \
    dark:hover:text-white dark:hover:bg-gray-700";

// Toolbar styles
pub(crate) const TOOLBAR_STYLE: &str = "flex flex-wrap items-center justify-between gap-3 p-4";

pub(crate) const SEARCH_INPUT_STYLE: &str = "block p-2 pl-3 text-sm rounded w-64 \
    text-gray-900 dark:text-white bg-gray-50 dark:bg-gray-700 border \
    border-gray-300 dark:border-gray-600 dark:placeholder-gray-400 \
    focus:ring-blue-600 focus:border-blue-600";

// Stat card styles
pub(crate) const STAT_GRID_STYLE: &str = "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-4";

pub(crate) const STAT_CARD_STYLE: &str = "p-4 bg-white dark:bg-gray-800 rounded-lg shadow \
    text-gray-900 dark:text-white";

// Filter drawer styles
pub(crate) const FILTER_DRAWER_STYLE: &str = "p-4 border-b border-gray-200 dark:border-gray-700 \
    grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4";

// Bulk action bar style
pub(crate) const BULK_BAR_STYLE: &str = "flex items-center gap-3 px-4 py-2 \
    bg-blue-50 dark:bg-blue-900/30 text-sm text-blue-800 dark:text-blue-200";

// Pagination strip style
pub(crate) const PAGINATION_STRIP_STYLE: &str = "flex flex-wrap items-center justify-between \
    gap-3 p-4 text-sm text-gray-700 dark:text-gray-400";

/// The page shell around a standalone table surface.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Tableur" }
                link href="/static/main.css" rel="stylesheet";
            }
            body class="bg-gray-100 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}
