use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast queued for the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub detail: Option<String>,
    pub duration_ms: u64,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: &str, detail: Option<&str>, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            detail: detail.map(str::to_string),
            duration_ms,
        }
    }
}
