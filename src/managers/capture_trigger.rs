//! Capture trigger and creation modal state.
//!
//! A URI dropped anywhere on the dashboard becomes the pending creation input
//! and opens the modal. No validation happens here.

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureTrigger {
    pending_url: String,
    modal_open: bool,
}

impl CaptureTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a dropped or pasted URI.
    pub fn on_uri(&mut self, uri: &str) {
        debug!(%uri, "captured uri");
        self.pending_url = uri.to_string();
        self.modal_open = true;
    }

    /// Opens the modal for a manual add with an empty input.
    pub fn open_manual(&mut self) {
        self.pending_url.clear();
        self.modal_open = true;
    }

    pub fn close(&mut self) {
        self.pending_url.clear();
        self.modal_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    pub fn pending_url(&self) -> &str {
        &self.pending_url
    }
}
