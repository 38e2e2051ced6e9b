use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// Default number of bookmarks per page before responsive scaling.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// How the current page of bookmarks is laid out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Card,
    List,
    Detail,
}

/// Which sidebar filter a value applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Category,
    Tag,
}

/// The mutable UI-facing subset of store state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_text: String,
    pub category_filter: Option<String>,
    pub tag_filter: Option<String>,
    pub current_page: usize,
    pub page_size: usize,
    pub active_view: ViewMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category_filter: None,
            tag_filter: None,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            active_view: ViewMode::Card,
        }
    }
}

impl ViewState {
    /// True when a category or tag filter is selected.
    pub fn has_filter(&self) -> bool {
        self.category_filter.is_some() || self.tag_filter.is_some()
    }

    /// True when any filter or a non-empty search narrows the collection.
    pub fn is_narrowed(&self) -> bool {
        self.has_filter() || !self.search_text.is_empty()
    }
}

/// Named viewport-width bucket, widest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    #[serde(rename = "3xl")]
    Xxl,
    #[serde(rename = "2xl")]
    Xl2,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "s")]
    S,
}

impl Breakpoint {
    /// All breakpoints ordered from widest to narrowest.
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Xxl,
        Breakpoint::Xl2,
        Breakpoint::Xl,
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::S,
    ];

    /// Minimum viewport width in CSS pixels for this bucket.
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Xxl => 2200,
            Breakpoint::Xl2 => 1536,
            Breakpoint::Xl => 1280,
            Breakpoint::Lg => 1024,
            Breakpoint::Md => 768,
            Breakpoint::S => 640,
        }
    }

    /// Page-size multiplier in percent of the base page size.
    pub fn page_size_percent(self) -> usize {
        match self {
            Breakpoint::Xxl => 120,
            Breakpoint::Xl2 => 100,
            Breakpoint::Xl => 80,
            Breakpoint::Lg => 65,
            Breakpoint::Md => 40,
            Breakpoint::S => 40,
        }
    }

    /// Classifies a viewport width. Widths narrower than the smallest bucket map to `S`.
    pub fn from_width(width: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::S)
    }
}

/// Everything the UI layer needs to draw the dashboard after an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub items: Vec<Bookmark>,
    pub current_page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total_count: usize,
    pub search_text: String,
    pub category_filter: Option<String>,
    pub tag_filter: Option<String>,
    pub active_view: ViewMode,
    pub breakpoint: Breakpoint,
    /// The user has no bookmarks at all.
    pub empty_collection: bool,
    /// There are bookmarks, but none on the current page.
    pub no_results: bool,
    pub modal_open: bool,
    pub pending_url: String,
    pub loading: bool,
    pub edit_bookmark: Option<Bookmark>,
    pub locale: String,
}
