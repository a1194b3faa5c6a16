//! Page metadata and the pagination indicator strip.

/// Page metadata for the current view.
///
/// In client mode the engine derives this from the filtered row count; in
/// server mode the caller reports it verbatim. `current_page` is always
/// within `1..=total_pages`, and `total_pages` is at least 1 even for an
/// empty row set, so navigation never lands out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// The 1-based page on display.
    pub current_page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// Rows in the whole (filtered) set.
    pub total_items: u64,
    /// Page count, at least 1.
    pub total_pages: u64,
}

impl Pagination {
    /// Derive page metadata for a client-mode view.
    ///
    /// A requested page outside the valid range clamps rather than
    /// errors, so stale page state after a filter change self-corrects.
    pub fn client(total_items: u64, page: u64, page_size: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);

        Self {
            current_page: page.clamp(1, total_pages),
            page_size,
            total_items,
            total_pages,
        }
    }

    /// Metadata for a view with paging disabled: everything on one page.
    pub fn single_page(total_items: u64) -> Self {
        Self {
            current_page: 1,
            page_size: total_items.max(1),
            total_items,
            total_pages: 1,
        }
    }

    /// The half-open index range of the current page within the filtered
    /// set.
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);

        (start.min(self.total_items) as usize, end as usize)
    }

    /// 1-based ordinal of the first entry on display, 0 when empty.
    pub fn first_entry(&self) -> u64 {
        if self.total_items == 0 {
            return 0;
        }

        (self.current_page - 1) * self.page_size + 1
    }

    /// 1-based ordinal of the last entry on display.
    pub fn last_entry(&self) -> u64 {
        (self.current_page * self.page_size).min(self.total_items)
    }
}

/// One element of the pagination strip.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A navigable page number.
    Page(u64),
    /// The page on display.
    CurrPage(u64),
    /// A gap between the window and the first or last page.
    Ellipsis,
    /// Forward navigation, holding the target page.
    NextButton(u64),
    /// Backward navigation, holding the target page.
    BackButton(u64),
}

/// Build the indicator strip: a window of up to `max_pages` numbers
/// around the current page, with the first and last page always reachable
/// across an ellipsis, and back/next buttons when a neighbour exists.
pub fn create_pagination_indicators(
    pagination: &Pagination,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let curr_page = pagination.current_page;
    let page_count = pagination.total_pages;

    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}
