use serde::{Deserialize, Serialize};

/// Represents a saved bookmark as delivered by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

impl Bookmark {
    /// Builds a bookmark with only the required fields set.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
            description: None,
            created_at: String::new(),
            image: None,
            category_id: None,
            category: None,
            tags: Vec::new(),
        }
    }

    /// The owning category id, falling back to the embedded category reference.
    pub fn category_id(&self) -> Option<&str> {
        self.category_id
            .as_deref()
            .or_else(|| self.category.as_ref().map(|c| c.id.as_str()))
    }

    /// Returns true if any attached tag has the given id.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

/// Lightweight category reference embedded in a bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Lightweight tag reference embedded in a bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Number of bookmarks attached to a category or tag, in the server's `_count` shape.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BookmarkCount {
    #[serde(default)]
    pub bookmarks: u64,
}

/// A user-defined category for grouping bookmarks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "_count", default)]
    pub count: BookmarkCount,
}

impl Category {
    pub fn bookmark_count(&self) -> u64 {
        self.count.bookmarks
    }
}

/// A user-defined tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(rename = "_count", default)]
    pub count: BookmarkCount,
}

impl Tag {
    pub fn bookmark_count(&self) -> u64 {
        self.count.bookmarks
    }
}
