//! Bookmark creation pipeline.
//!
//! Confirm-then-commit: the store only learns about a new bookmark after the
//! backend has acknowledged it. At most one creation is in flight; the loading
//! flag gates `begin` and is cleared on every terminal outcome.

use tracing::{error, info, warn};

use crate::managers::capture_trigger::CaptureTrigger;
use crate::managers::collection_store::CollectionStoreTrait;
use crate::services::creation_backend::CreationBackend;
use crate::types::bookmark::Bookmark;
use crate::types::creation::{CreateBookmarkRequest, CreationOutcome, CreationState};
use crate::types::errors::CreateError;
use crate::types::notification::{Notification, NotificationKind};

/// Proof that a submission was admitted. Consumed by `finish`.
#[derive(Debug)]
pub struct CreationTicket {
    request: CreateBookmarkRequest,
}

impl CreationTicket {
    pub fn request(&self) -> &CreateBookmarkRequest {
        &self.request
    }

    pub fn url(&self) -> &str {
        &self.request.url
    }
}

/// A finished creation: what happened and the toast to show for it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub outcome: CreationOutcome,
    pub notification: Notification,
}

#[derive(Debug, Clone)]
pub struct CreationPipeline {
    state: CreationState,
    last_terminal: Option<CreationState>,
    toast_duration_ms: u64,
}

impl CreationPipeline {
    pub fn new(toast_duration_ms: u64) -> Self {
        Self {
            state: CreationState::Idle,
            last_terminal: None,
            toast_duration_ms,
        }
    }

    pub fn state(&self) -> CreationState {
        self.state
    }

    /// Whether the most recent creation ended in success or failure.
    pub fn last_terminal(&self) -> Option<CreationState> {
        self.last_terminal
    }

    pub fn is_loading(&self) -> bool {
        self.state == CreationState::Submitting
    }

    /// Applies to notifications raised after the call.
    pub fn set_toast_duration(&mut self, duration_ms: u64) {
        self.toast_duration_ms = duration_ms;
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    /// IDLE → SUBMITTING. Rejected with `Busy` while another creation is pending.
    pub fn begin(&mut self, url: &str, user_id: &str) -> Result<CreationTicket, CreateError> {
        if self.is_loading() {
            warn!(%url, "submission rejected, creation already in flight");
            return Err(CreateError::Busy);
        }
        self.state = CreationState::Submitting;
        Ok(CreationTicket {
            request: CreateBookmarkRequest {
                url: url.to_string(),
                user_id: user_id.to_string(),
            },
        })
    }

    /// SUBMITTING → SUCCESS/FAILURE → IDLE.
    ///
    /// On success the bookmark is merged into `store` and the capture modal is
    /// closed. On failure the store is left untouched.
    pub fn finish<S: CollectionStoreTrait>(
        &mut self,
        ticket: CreationTicket,
        result: Result<Bookmark, CreateError>,
        store: &mut S,
        capture: &mut CaptureTrigger,
    ) -> Completion {
        debug_assert_eq!(
            self.state,
            CreationState::Submitting,
            "finish called without a matching begin"
        );
        let url = ticket.request.url;
        let completion = match result {
            Ok(bookmark) => {
                info!(%url, id = %bookmark.id, "bookmark created");
                self.last_terminal = Some(CreationState::Success);
                store.add_bookmark(bookmark.clone());
                if capture.is_open() {
                    capture.close();
                }
                Completion {
                    outcome: CreationOutcome::Created(bookmark),
                    notification: self.toast(NotificationKind::Success, "Successfully added", &url),
                }
            }
            Err(err) => {
                error!(%url, error = %err, "saving bookmark failed");
                self.last_terminal = Some(CreationState::Failure);
                let title = if err.is_rejection() {
                    "Error Saving"
                } else {
                    "Error adding"
                };
                Completion {
                    outcome: CreationOutcome::Failed(err.to_string()),
                    notification: self.toast(NotificationKind::Error, title, &url),
                }
            }
        };
        self.state = CreationState::Idle;
        completion
    }

    /// Runs a whole submission: begin, backend round trip, finish.
    pub async fn submit<B, S>(
        &mut self,
        backend: &B,
        store: &mut S,
        capture: &mut CaptureTrigger,
        url: &str,
        user_id: &str,
    ) -> Result<Completion, CreateError>
    where
        B: CreationBackend,
        S: CollectionStoreTrait,
    {
        let ticket = self.begin(url, user_id)?;
        let result = backend.create(ticket.request()).await;
        Ok(self.finish(ticket, result, store, capture))
    }

    fn toast(&self, kind: NotificationKind, title: &str, url: &str) -> Notification {
        Notification::new(kind, title, Some(url), self.toast_duration_ms)
    }
}

impl Default for CreationPipeline {
    fn default() -> Self {
        Self::new(5000)
    }
}
