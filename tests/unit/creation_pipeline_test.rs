//! Unit tests for the confirm-then-commit creation flow, driven through the
//! `Dashboard` facade with a scripted backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use briefkasten::app::{Dashboard, DashboardEvent};
use briefkasten::managers::collection_store::CollectionStoreTrait;
use briefkasten::services::creation_backend::CreationBackend;
use briefkasten::services::locale::StaticLocaleSource;
use briefkasten::types::bookmark::Bookmark;
use briefkasten::types::creation::{CreateBookmarkRequest, CreationOutcome, CreationState};
use briefkasten::types::errors::CreateError;
use briefkasten::types::notification::NotificationKind;
use briefkasten::types::settings::DashboardConfig;
use briefkasten::types::snapshot::{HydrationSnapshot, UserIdentity};

/// Backend that answers every request with a fixed result and counts calls.
struct ScriptedBackend {
    result: Result<Bookmark, CreateError>,
    calls: AtomicUsize,
    last_user: std::sync::Mutex<Option<String>>,
}

impl ScriptedBackend {
    fn new(result: Result<Bookmark, CreateError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_user: std::sync::Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CreationBackend for ScriptedBackend {
    async fn create(&self, request: &CreateBookmarkRequest) -> Result<Bookmark, CreateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user.lock().unwrap() = Some(request.user_id.clone());
        self.result.clone()
    }
}

fn created(id: &str, url: &str) -> Bookmark {
    let mut b = Bookmark::new(id, url);
    b.title = Some("Example Domain".to_string());
    b
}

fn dashboard(backend: ScriptedBackend, existing: usize) -> Dashboard<ScriptedBackend> {
    let snapshot = HydrationSnapshot {
        bookmarks: (0..existing)
            .map(|i| Bookmark::new(format!("old{}", i), format!("https://old{}.example", i)))
            .collect(),
        user: Some(UserIdentity {
            user_id: "user-1".to_string(),
            name: None,
            email: None,
        }),
        ..HydrationSnapshot::default()
    };
    Dashboard::start(snapshot, backend, DashboardConfig::default(), &StaticLocaleSource::default())
        .expect("session should start")
}

#[tokio::test]
async fn test_success_adds_exactly_one_bookmark() {
    let backend = ScriptedBackend::new(Ok(created("abc", "https://example.com")));
    let mut dash = dashboard(backend, 2);

    let outcome = dash.submit("https://example.com").await.unwrap();

    assert!(outcome.is_created());
    assert_eq!(dash.store().bookmarks().len(), 3);
    assert_eq!(
        dash.store().bookmarks().iter().filter(|b| b.id == "abc").count(),
        1
    );
    assert!(!dash.pipeline().is_loading());
    assert_eq!(dash.pipeline().state(), CreationState::Idle);
    assert_eq!(dash.pipeline().last_terminal(), Some(CreationState::Success));
    assert_eq!(dash.backend().calls(), 1);
    assert_eq!(
        dash.backend().last_user.lock().unwrap().as_deref(),
        Some("user-1")
    );

    let notes = dash.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert_eq!(notes[0].title, "Successfully added");
    assert_eq!(notes[0].detail.as_deref(), Some("https://example.com"));
    assert_eq!(notes[0].duration_ms, 5000);
}

#[tokio::test]
async fn test_success_closes_capture_modal() {
    let backend = ScriptedBackend::new(Ok(created("abc", "https://dropped.example")));
    let mut dash = dashboard(backend, 0);

    dash.handle(DashboardEvent::UriDropped {
        uri: "https://dropped.example".to_string(),
    });
    assert!(dash.capture().is_open());

    dash.submit_pending().await.unwrap();
    assert!(!dash.capture().is_open());
    assert_eq!(dash.store().bookmarks()[0].id, "abc");
}

#[tokio::test]
async fn test_rejection_leaves_store_unchanged() {
    let backend = ScriptedBackend::new(Err(CreateError::Status(500)));
    let mut dash = dashboard(backend, 4);

    let outcome = dash.submit("https://example.com").await.unwrap();

    assert!(matches!(outcome, CreationOutcome::Failed(_)));
    assert_eq!(dash.store().bookmarks().len(), 4);
    assert!(!dash.pipeline().is_loading());
    assert_eq!(dash.pipeline().last_terminal(), Some(CreationState::Failure));

    let notes = dash.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Error);
    assert_eq!(notes[0].title, "Error Saving");
    assert_eq!(notes[0].detail.as_deref(), Some("https://example.com"));
}

#[tokio::test]
async fn test_transport_failure_keeps_modal_open() {
    let backend = ScriptedBackend::new(Err(CreateError::Transport("connection reset".to_string())));
    let mut dash = dashboard(backend, 1);
    dash.handle(DashboardEvent::UriDropped {
        uri: "https://flaky.example".to_string(),
    });

    dash.submit_pending().await.unwrap();

    assert!(dash.capture().is_open());
    assert_eq!(dash.store().bookmarks().len(), 1);
    let notes = dash.drain_notifications();
    assert_eq!(notes[0].title, "Error adding");
    assert_eq!(notes[0].detail.as_deref(), Some("https://flaky.example"));
}

#[test]
fn test_second_submission_rejected_while_pending() {
    let backend = ScriptedBackend::new(Ok(created("abc", "https://example.com")));
    let mut dash = dashboard(backend, 0);

    let first = dash.begin_submit("https://example.com").unwrap();
    assert!(dash.render().loading);
    assert!(!dash.pipeline().can_submit());

    let second = dash.begin_submit("https://example.com");
    assert_eq!(second.unwrap_err(), CreateError::Busy);

    let outcome = dash.finish_submit(first, Ok(created("abc", "https://example.com")));
    assert!(outcome.is_created());
    assert_eq!(dash.store().bookmarks().len(), 1);
    assert!(dash.pipeline().can_submit());

    // Gate reopens after completion
    assert!(dash.begin_submit("https://other.example").is_ok());
}

#[test]
fn test_failed_then_successful_submission() {
    let backend = ScriptedBackend::new(Err(CreateError::Status(503)));
    let mut dash = dashboard(backend, 0);

    let ticket = dash.begin_submit("https://example.com").unwrap();
    dash.finish_submit(ticket, Err(CreateError::Status(503)));
    assert!(dash.store().bookmarks().is_empty());

    let ticket = dash.begin_submit("https://example.com").unwrap();
    dash.finish_submit(ticket, Ok(created("later", "https://example.com")));
    assert_eq!(dash.store().bookmarks().len(), 1);
    assert_eq!(dash.drain_notifications().len(), 2);
}
