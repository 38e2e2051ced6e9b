//! Dashboard core for Briefkasten.
//!
//! Central struct holding the collection store, page-size controller, capture
//! trigger and creation pipeline for one authenticated session. All mutation
//! goes through `&mut Dashboard`, which keeps a single writer.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::managers::capture_trigger::CaptureTrigger;
use crate::managers::collection_store::{CollectionStore, CollectionStoreTrait};
use crate::managers::creation_pipeline::{CreationPipeline, CreationTicket};
use crate::managers::page_size_controller::PageSizeController;
use crate::services::creation_backend::CreationBackend;
use crate::services::locale::{detect_locale, LocaleSource};
use crate::types::bookmark::Bookmark;
use crate::types::creation::CreationOutcome;
use crate::types::errors::{CreateError, SessionError};
use crate::types::notification::Notification;
use crate::types::settings::{DashboardConfig, UserSettingsPatch};
use crate::types::snapshot::{HydrationSnapshot, UserIdentity};
use crate::types::view::{FilterKind, PageView, ViewMode};

/// Where unauthenticated sessions are sent.
pub const SIGN_IN_PATH: &str = "/auth/signin";

/// A discrete UI event. Each one runs to completion before the next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    SearchChanged { text: String },
    FilterSelected { kind: FilterKind, value: Option<String> },
    PageChanged { page: i64 },
    ViewModeChanged { mode: ViewMode },
    ViewportResized { width: u32 },
    UriDropped { uri: String },
    AddRequested,
    ModalClosed,
    EditRequested { id: Option<String> },
}

/// One dashboard session.
pub struct Dashboard<B: CreationBackend> {
    store: CollectionStore,
    page_size: PageSizeController,
    capture: CaptureTrigger,
    pipeline: CreationPipeline,
    identity: UserIdentity,
    backend: B,
    config: DashboardConfig,
    notifications: Vec<Notification>,
}

impl<B: CreationBackend> Dashboard<B> {
    /// Starts a session from a hydration snapshot.
    ///
    /// A snapshot without a user never reaches the store; the caller gets the
    /// sign-in redirect instead. The ambient locale is recorded before the
    /// first event is processed.
    pub fn start(
        snapshot: HydrationSnapshot,
        backend: B,
        config: DashboardConfig,
        locale_source: &dyn LocaleSource,
    ) -> Result<Self, SessionError> {
        let identity = snapshot.user.ok_or_else(|| SessionError::Unauthenticated {
            redirect: SIGN_IN_PATH.to_string(),
        })?;

        let mut store =
            CollectionStore::seeded(snapshot.bookmarks, snapshot.categories, snapshot.tags);
        let page_size = PageSizeController::new(config.base_page_size);
        store.set_page_size(page_size.page_size());
        store.set_user_setting(UserSettingsPatch::locale(detect_locale(locale_source)));

        info!(
            user = %identity.user_id,
            bookmarks = store.bookmarks().len(),
            locale = %store.settings().locale,
            "dashboard session started"
        );

        Ok(Self {
            store,
            page_size,
            capture: CaptureTrigger::new(),
            pipeline: CreationPipeline::new(config.toast_duration_ms),
            identity,
            backend,
            config,
            notifications: Vec::new(),
        })
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn capture(&self) -> &CaptureTrigger {
        &self.capture
    }

    pub fn pipeline(&self) -> &CreationPipeline {
        &self.pipeline
    }

    pub fn page_size_controller(&self) -> &PageSizeController {
        &self.page_size
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Applies a synchronous UI event. Derived state is fresh on return.
    pub fn handle(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SearchChanged { text } => self.store.set_search_text(&text),
            DashboardEvent::FilterSelected { kind, value } => {
                self.store.set_filter(kind, value.as_deref())
            }
            DashboardEvent::PageChanged { page } => self.store.set_page(page),
            DashboardEvent::ViewModeChanged { mode } => {
                self.store.set_user_setting(UserSettingsPatch::active_view(mode))
            }
            DashboardEvent::ViewportResized { width } => {
                let size = self.page_size.on_viewport_change(width);
                self.store.set_page_size(size);
            }
            DashboardEvent::UriDropped { uri } => self.capture.on_uri(&uri),
            DashboardEvent::AddRequested => self.capture.open_manual(),
            DashboardEvent::ModalClosed => self.capture.close(),
            DashboardEvent::EditRequested { id } => {
                self.store.set_edit_bookmark(id.as_deref());
            }
        }
    }

    /// Takes over a changed operator config. Page size and toast duration
    /// apply immediately; the backend address and timeout only on next start.
    pub fn apply_config(&mut self, config: DashboardConfig) {
        let size = self.page_size.set_base(config.base_page_size);
        self.store.set_page_size(size);
        self.pipeline.set_toast_duration(config.toast_duration_ms);
        info!(base_page_size = config.base_page_size, page_size = size, "config applied");
        self.config = config;
    }

    pub fn set_user_setting(&mut self, patch: UserSettingsPatch) {
        self.store.set_user_setting(patch);
    }

    /// Submits `url` for the session's user and waits for the backend.
    ///
    /// Returns `Err(CreateError::Busy)` only when another creation is still in
    /// flight; backend failures come back as `CreationOutcome::Failed`.
    pub async fn submit(&mut self, url: &str) -> Result<CreationOutcome, CreateError> {
        let completion = self
            .pipeline
            .submit(
                &self.backend,
                &mut self.store,
                &mut self.capture,
                url,
                &self.identity.user_id,
            )
            .await?;
        self.notifications.push(completion.notification);
        Ok(completion.outcome)
    }

    /// Submits the URL currently pending in the capture modal.
    pub async fn submit_pending(&mut self) -> Result<CreationOutcome, CreateError> {
        let url = self.capture.pending_url().to_string();
        self.submit(&url).await
    }

    /// First half of a submission, for callers that release the dashboard
    /// while the backend call is pending.
    pub fn begin_submit(&mut self, url: &str) -> Result<CreationTicket, CreateError> {
        self.pipeline.begin(url, &self.identity.user_id)
    }

    /// Second half of a submission started with `begin_submit`.
    pub fn finish_submit(
        &mut self,
        ticket: CreationTicket,
        result: Result<Bookmark, CreateError>,
    ) -> CreationOutcome {
        let completion = self
            .pipeline
            .finish(ticket, result, &mut self.store, &mut self.capture);
        self.notifications.push(completion.notification);
        completion.outcome
    }

    /// Notifications queued since the last drain, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Builds the render model for the current state.
    pub fn render(&self) -> PageView {
        let view = self.store.view_state();
        let items: Vec<Bookmark> = self
            .store
            .current_page_items()
            .into_iter()
            .cloned()
            .collect();
        let empty_collection = self.store.bookmarks().is_empty();
        PageView {
            no_results: !empty_collection && items.is_empty(),
            items,
            current_page: view.current_page,
            page_size: view.page_size,
            page_count: self.store.page_count(),
            total_count: self.store.total_count(),
            search_text: view.search_text.clone(),
            category_filter: view.category_filter.clone(),
            tag_filter: view.tag_filter.clone(),
            active_view: view.active_view,
            breakpoint: self.page_size.breakpoint(),
            empty_collection,
            modal_open: self.capture.is_open(),
            pending_url: self.capture.pending_url().to_string(),
            loading: self.pipeline.is_loading(),
            edit_bookmark: self.store.edit_bookmark().cloned(),
            locale: self.store.settings().locale.clone(),
        }
    }
}
