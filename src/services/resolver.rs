//! Filter/search resolver.
//!
//! Maps the bookmark collection and the current [`ViewState`] to the ordered
//! indices of the bookmarks that should be shown. Original order is preserved.
//!
//! Precedence: a category or tag filter wins over search text. When both a
//! category and a tag filter are selected, a bookmark matching *either* one is
//! included. That union behaviour is kept as observed in the product even
//! though an intersection may have been intended.

use crate::types::bookmark::Bookmark;
use crate::types::view::ViewState;

/// Returns the indices of `bookmarks` matching `view`, in collection order.
pub fn resolve(bookmarks: &[Bookmark], view: &ViewState) -> Vec<usize> {
    let needle = view.search_text.to_lowercase();
    bookmarks
        .iter()
        .enumerate()
        .filter(|(_, b)| matches_with(b, view, &needle))
        .map(|(i, _)| i)
        .collect()
}

fn matches_with(bookmark: &Bookmark, view: &ViewState, needle: &str) -> bool {
    if view.has_filter() {
        let in_category = view
            .category_filter
            .as_deref()
            .is_some_and(|c| bookmark.category_id() == Some(c));
        let in_tag = view
            .tag_filter
            .as_deref()
            .is_some_and(|t| bookmark.has_tag(t));
        in_category || in_tag
    } else if !needle.is_empty() {
        matches_search(bookmark, needle)
    } else {
        true
    }
}

/// Case-insensitive substring match on url, title and description.
/// `needle` must already be lowercase. Missing fields never match.
fn matches_search(bookmark: &Bookmark, needle: &str) -> bool {
    let hit = |field: Option<&str>| field.is_some_and(|s| s.to_lowercase().contains(needle));
    hit(Some(&bookmark.url))
        || hit(bookmark.title.as_deref())
        || hit(bookmark.description.as_deref())
}
