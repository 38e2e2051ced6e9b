//! Unit tests for `Dashboard` session start, event handling and rendering.

use briefkasten::app::{Dashboard, DashboardEvent, SIGN_IN_PATH};
use briefkasten::managers::collection_store::CollectionStoreTrait;
use briefkasten::services::creation_backend::CreationBackend;
use briefkasten::services::locale::StaticLocaleSource;
use briefkasten::types::bookmark::Bookmark;
use briefkasten::types::creation::CreateBookmarkRequest;
use briefkasten::types::errors::{CreateError, SessionError};
use briefkasten::types::settings::DashboardConfig;
use briefkasten::types::snapshot::{HydrationSnapshot, UserIdentity};
use briefkasten::types::view::{Breakpoint, FilterKind, ViewMode};

/// Backend that is never expected to be reached by these tests.
struct OfflineBackend;

impl CreationBackend for OfflineBackend {
    async fn create(&self, _request: &CreateBookmarkRequest) -> Result<Bookmark, CreateError> {
        Err(CreateError::Transport("offline".to_string()))
    }
}

fn user() -> UserIdentity {
    UserIdentity {
        user_id: "user-1".to_string(),
        name: Some("Nico".to_string()),
        email: None,
    }
}

fn snapshot(n: usize) -> HydrationSnapshot {
    HydrationSnapshot {
        bookmarks: (0..n)
            .map(|i| {
                let mut b = Bookmark::new(format!("b{}", i), format!("https://site{}.example", i));
                b.title = Some(format!("Site {}", i));
                if i % 2 == 0 {
                    b.category_id = Some("c1".to_string());
                }
                b
            })
            .collect(),
        user: Some(user()),
        ..HydrationSnapshot::default()
    }
}

fn start(n: usize, locales: &[&str]) -> Dashboard<OfflineBackend> {
    let source = StaticLocaleSource(locales.iter().map(|s| s.to_string()).collect());
    Dashboard::start(snapshot(n), OfflineBackend, DashboardConfig::default(), &source)
        .expect("session should start")
}

#[test]
fn test_missing_user_redirects_to_sign_in() {
    let snapshot = HydrationSnapshot {
        bookmarks: vec![Bookmark::new("b0", "https://a.example")],
        ..HydrationSnapshot::default()
    };
    let result = Dashboard::start(
        snapshot,
        OfflineBackend,
        DashboardConfig::default(),
        &StaticLocaleSource::default(),
    );
    match result {
        Err(SessionError::Unauthenticated { redirect }) => assert_eq!(redirect, SIGN_IN_PATH),
        Ok(_) => panic!("session without a user must not start"),
    }
}

#[test]
fn test_start_records_locale_and_seeds_store() {
    let dash = start(20, &["C", "de_DE.UTF-8"]);
    assert_eq!(dash.store().settings().locale, "de-DE");
    assert_eq!(dash.store().bookmarks().len(), 20);
    assert_eq!(dash.identity().user_id, "user-1");

    let view = dash.render();
    assert_eq!(view.locale, "de-DE");
    assert_eq!(view.current_page, 1);
    assert_eq!(view.page_size, 15);
    assert_eq!(view.items.len(), 15);
    assert_eq!(view.page_count, 2);
    assert_eq!(view.total_count, 20);
}

#[test]
fn test_locale_falls_back_to_en_us() {
    let dash = start(0, &[]);
    assert_eq!(dash.store().settings().locale, "en-US");
}

#[test]
fn test_viewport_resize_changes_page_size_not_page() {
    let mut dash = start(40, &[]);
    dash.handle(DashboardEvent::PageChanged { page: 2 });

    dash.handle(DashboardEvent::ViewportResized { width: 1100 });
    let view = dash.render();
    assert_eq!(view.breakpoint, Breakpoint::Lg);
    assert_eq!(view.page_size, 9);
    assert_eq!(view.current_page, 2);
    assert_eq!(view.items[0].id, "b9");

    dash.handle(DashboardEvent::ViewportResized { width: 2400 });
    assert_eq!(dash.render().page_size, 18);
    assert_eq!(dash.page_size_controller().width(), Some(2400));
}

#[test]
fn test_apply_config_rescales_at_current_breakpoint() {
    let mut dash = start(40, &[]);
    dash.handle(DashboardEvent::ViewportResized { width: 1100 });

    let config = DashboardConfig {
        base_page_size: 20,
        toast_duration_ms: 1200,
        ..DashboardConfig::default()
    };
    dash.apply_config(config.clone());

    let view = dash.render();
    assert_eq!(view.breakpoint, Breakpoint::Lg);
    assert_eq!(view.page_size, 13);
    assert_eq!(view.page_count, 4);
    assert_eq!(dash.config(), &config);
}

#[test]
fn test_empty_collection_flag() {
    let dash = start(0, &[]);
    let view = dash.render();
    assert!(view.empty_collection);
    assert!(!view.no_results);
    assert!(view.items.is_empty());
    assert_eq!(view.page_count, 0);
}

#[test]
fn test_no_results_flag_for_unmatched_search() {
    let mut dash = start(5, &[]);
    dash.handle(DashboardEvent::SearchChanged {
        text: "nothing matches this".to_string(),
    });
    let view = dash.render();
    assert!(!view.empty_collection);
    assert!(view.no_results);
    assert_eq!(view.total_count, 0);
}

#[test]
fn test_filter_event_narrows_view() {
    let mut dash = start(10, &[]);
    dash.handle(DashboardEvent::FilterSelected {
        kind: FilterKind::Category,
        value: Some("c1".to_string()),
    });
    let view = dash.render();
    assert_eq!(view.category_filter.as_deref(), Some("c1"));
    assert_eq!(view.total_count, 5);

    dash.handle(DashboardEvent::FilterSelected {
        kind: FilterKind::Category,
        value: None,
    });
    assert_eq!(dash.render().total_count, 10);
}

#[test]
fn test_view_mode_and_edit_events() {
    let mut dash = start(3, &[]);
    dash.handle(DashboardEvent::ViewModeChanged { mode: ViewMode::Detail });
    assert_eq!(dash.render().active_view, ViewMode::Detail);

    dash.handle(DashboardEvent::EditRequested {
        id: Some("b1".to_string()),
    });
    assert_eq!(
        dash.render().edit_bookmark.map(|b| b.id),
        Some("b1".to_string())
    );

    dash.handle(DashboardEvent::EditRequested { id: None });
    assert!(dash.render().edit_bookmark.is_none());
}

#[test]
fn test_capture_events_drive_modal() {
    let mut dash = start(0, &[]);
    dash.handle(DashboardEvent::UriDropped {
        uri: "https://dropped.example".to_string(),
    });
    let view = dash.render();
    assert!(view.modal_open);
    assert_eq!(view.pending_url, "https://dropped.example");

    dash.handle(DashboardEvent::ModalClosed);
    let view = dash.render();
    assert!(!view.modal_open);
    assert_eq!(view.pending_url, "");

    dash.handle(DashboardEvent::AddRequested);
    assert!(dash.render().modal_open);
}

#[test]
fn test_events_deserialize_from_tagged_json() {
    let event: DashboardEvent =
        serde_json::from_str(r#"{"type":"viewport_resized","width":800}"#).unwrap();
    assert_eq!(event, DashboardEvent::ViewportResized { width: 800 });

    let event: DashboardEvent = serde_json::from_str(r#"{"type":"add_requested"}"#).unwrap();
    assert_eq!(event, DashboardEvent::AddRequested);
}
