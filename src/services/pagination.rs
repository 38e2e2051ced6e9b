//! Pagination engine.
//!
//! Slices a filtered sequence into pages, computes pager totals and owns the
//! page-reset rule applied when the search text changes.

use std::ops::Range;

use crate::types::view::ViewState;

/// Index range of page `page` (1-based) within a sequence of `len` items.
///
/// Pages past the end yield an empty range anchored at `len`.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Returns the items on page `page` (1-based).
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[page_bounds(items.len(), page, page_size)]
}

/// Total shown by the pager: the filtered length when the view is narrowed,
/// otherwise the full collection size.
pub fn total_count(view: &ViewState, filtered_len: usize, collection_len: usize) -> usize {
    if view.is_narrowed() {
        filtered_len
    } else {
        collection_len
    }
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Search-text changes send the user back to page one. Filter changes do not,
/// and search text is ignored entirely while a filter is selected.
pub fn should_reset_page(view: &ViewState, previous_search: &str) -> bool {
    !view.has_filter() && !view.search_text.is_empty() && view.search_text != previous_search
}
