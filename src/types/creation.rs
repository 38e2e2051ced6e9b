use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// Payload sent to the creation backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmarkRequest {
    pub url: String,
    pub user_id: String,
}

/// Success body returned by the creation backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateBookmarkResponse {
    pub data: Bookmark,
}

/// Phase of the confirm-then-commit creation flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CreationState {
    Idle,
    Submitting,
    Success,
    Failure,
}

/// Result of a finished creation attempt, as reported to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationOutcome {
    Created(Bookmark),
    Failed(String),
}

impl CreationOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreationOutcome::Created(_))
    }
}
