use serde::{Deserialize, Serialize};

use super::bookmark::{Bookmark, Category, Tag};

/// The authenticated user a dashboard session belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Server-rendered state used to seed a dashboard session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HydrationSnapshot {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub user: Option<UserIdentity>,
}
