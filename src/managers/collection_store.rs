//! Collection Store for the Briefkasten dashboard.
//!
//! Implements `CollectionStoreTrait`, the single owner of bookmarks,
//! categories, tags, user settings and the view state. Every mutator
//! recomputes the filtered view and the current page before returning, so a
//! reader never sees a mutated store with stale derived state.

use tracing::debug;

use crate::services::pagination;
use crate::services::resolver;
use crate::types::bookmark::{Bookmark, Category, Tag};
use crate::types::settings::{UserSettings, UserSettingsPatch};
use crate::types::view::{FilterKind, ViewState};

/// Trait defining collection store operations.
pub trait CollectionStoreTrait {
    fn set_bookmarks(&mut self, bookmarks: Vec<Bookmark>);
    fn set_categories(&mut self, categories: Vec<Category>);
    fn set_tags(&mut self, tags: Vec<Tag>);
    fn add_bookmark(&mut self, bookmark: Bookmark);
    fn set_filter(&mut self, kind: FilterKind, value: Option<&str>);
    fn set_search_text(&mut self, text: &str);
    fn set_page(&mut self, page: i64);
    fn set_page_size(&mut self, page_size: usize);
    fn set_user_setting(&mut self, patch: UserSettingsPatch);
    fn set_edit_bookmark(&mut self, id: Option<&str>) -> bool;

    fn bookmarks(&self) -> &[Bookmark];
    fn categories(&self) -> &[Category];
    fn tags(&self) -> &[Tag];
    fn view_state(&self) -> &ViewState;
    fn settings(&self) -> &UserSettings;
    fn edit_bookmark(&self) -> Option<&Bookmark>;
    fn filtered_bookmarks(&self) -> Vec<&Bookmark>;
    fn filtered_len(&self) -> usize;
    fn current_page_items(&self) -> Vec<&Bookmark>;
    fn total_count(&self) -> usize;
    fn page_count(&self) -> usize;
}

/// In-memory collection store.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    bookmarks: Vec<Bookmark>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    settings: UserSettings,
    view: ViewState,
    edit_bookmark_id: Option<String>,
    /// Indices into `bookmarks` matching the view, in collection order.
    filtered: Vec<usize>,
    /// Indices into `bookmarks` on the current page.
    page: Vec<usize>,
    /// Search text seen by the previous recompute.
    last_search: String,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store seeded with a server snapshot.
    pub fn seeded(bookmarks: Vec<Bookmark>, categories: Vec<Category>, tags: Vec<Tag>) -> Self {
        let mut store = Self {
            bookmarks,
            categories,
            tags,
            ..Self::default()
        };
        store.recompute();
        store
    }

    /// Looks up a bookmark by id.
    pub fn get_bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    fn recompute(&mut self) {
        if pagination::should_reset_page(&self.view, &self.last_search) {
            debug!(search = %self.view.search_text, "search changed, returning to page 1");
            self.view.current_page = 1;
        }
        self.last_search.clone_from(&self.view.search_text);

        self.filtered = resolver::resolve(&self.bookmarks, &self.view);
        self.page =
            pagination::paginate(&self.filtered, self.view.current_page, self.view.page_size)
                .to_vec();
    }
}

impl CollectionStoreTrait for CollectionStore {
    fn set_bookmarks(&mut self, bookmarks: Vec<Bookmark>) {
        debug!(count = bookmarks.len(), "set bookmarks");
        self.bookmarks = bookmarks;
        self.recompute();
    }

    fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.recompute();
    }

    fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
        self.recompute();
    }

    /// Adds a bookmark at the front of the collection. A bookmark with an id
    /// that is already present replaces the existing entry in place.
    fn add_bookmark(&mut self, bookmark: Bookmark) {
        match self.bookmarks.iter_mut().find(|b| b.id == bookmark.id) {
            Some(existing) => {
                debug!(id = %bookmark.id, "replacing bookmark with duplicate id");
                *existing = bookmark;
            }
            None => {
                debug!(id = %bookmark.id, "add bookmark");
                self.bookmarks.insert(0, bookmark);
            }
        }
        self.recompute();
    }

    /// Selects or clears a category or tag filter. An empty value clears it.
    /// Does not reset the current page.
    fn set_filter(&mut self, kind: FilterKind, value: Option<&str>) {
        let value = value.filter(|v| !v.is_empty()).map(str::to_string);
        debug!(?kind, ?value, "set filter");
        match kind {
            FilterKind::Category => self.view.category_filter = value,
            FilterKind::Tag => self.view.tag_filter = value,
        }
        self.recompute();
    }

    fn set_search_text(&mut self, text: &str) {
        self.view.search_text = text.to_string();
        self.recompute();
    }

    /// Moves to the given page. Values below 1 are clamped to 1.
    fn set_page(&mut self, page: i64) {
        self.view.current_page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
        self.recompute();
    }

    fn set_page_size(&mut self, page_size: usize) {
        self.view.page_size = page_size.max(1);
        self.recompute();
    }

    fn set_user_setting(&mut self, patch: UserSettingsPatch) {
        if let Some(locale) = patch.locale {
            debug!(%locale, "set locale");
            self.settings.locale = locale;
        }
        if let Some(view) = patch.active_view {
            self.view.active_view = view;
        }
        self.recompute();
    }

    /// Marks the bookmark handed to the external editor. Unknown ids clear the
    /// selection and return false.
    fn set_edit_bookmark(&mut self, id: Option<&str>) -> bool {
        self.edit_bookmark_id = id
            .filter(|id| self.bookmarks.iter().any(|b| b.id == *id))
            .map(str::to_string);
        self.recompute();
        id.is_none() || self.edit_bookmark_id.is_some()
    }

    fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn view_state(&self) -> &ViewState {
        &self.view
    }

    fn settings(&self) -> &UserSettings {
        &self.settings
    }

    fn edit_bookmark(&self) -> Option<&Bookmark> {
        self.edit_bookmark_id
            .as_deref()
            .and_then(|id| self.get_bookmark(id))
    }

    fn filtered_bookmarks(&self) -> Vec<&Bookmark> {
        self.filtered.iter().map(|&i| &self.bookmarks[i]).collect()
    }

    fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    fn current_page_items(&self) -> Vec<&Bookmark> {
        self.page.iter().map(|&i| &self.bookmarks[i]).collect()
    }

    fn total_count(&self) -> usize {
        pagination::total_count(&self.view, self.filtered.len(), self.bookmarks.len())
    }

    fn page_count(&self) -> usize {
        pagination::page_count(self.total_count(), self.view.page_size)
    }
}
