//! RPC method handler for the Briefkasten JSON-lines protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` answers the synchronous dashboard methods. `RpcSession`
//! wraps it with the methods that need more than the dashboard: bookmark
//! creation, whose backend call runs on its own task while other requests keep
//! flowing, and config writes.

use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::app::{Dashboard, DashboardEvent};
use crate::managers::collection_store::CollectionStoreTrait;
use crate::managers::creation_pipeline::CreationTicket;
use crate::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use crate::services::creation_backend::CreationBackend;
use crate::types::bookmark::Bookmark;
use crate::types::creation::CreationOutcome;
use crate::types::errors::CreateError;
use crate::types::settings::UserSettingsPatch;
use crate::types::view::{FilterKind, ViewMode};

fn render<B: CreationBackend>(dashboard: &Dashboard<B>) -> Result<Value, String> {
    serde_json::to_value(dashboard.render()).map_err(|e| e.to_string())
}

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

/// Wraps a handler result in the response envelope.
pub fn response(id: Value, result: Result<Value, String>) -> Value {
    match result {
        Ok(val) => json!({"id": id, "result": val}),
        Err(err) => json!({"id": id, "error": err}),
    }
}

/// Dispatch a JSON-RPC method call against the session's dashboard.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// `bookmark.create`, `config.set` and `config.reset` are handled by
/// [`RpcSession`].
pub fn handle_method<B: CreationBackend>(
    dashboard: &mut Dashboard<B>,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── View ───
        "view.get" => render(dashboard),
        "view.search" => {
            let text = str_param(params, "text")?;
            dashboard.handle(DashboardEvent::SearchChanged { text: text.to_string() });
            render(dashboard)
        }
        "view.filter" => {
            let kind: FilterKind = params
                .get("kind")
                .cloned()
                .ok_or("missing kind")
                .and_then(|v| serde_json::from_value(v).map_err(|_| "invalid kind"))?;
            let value = params.get("value").and_then(|v| v.as_str()).map(str::to_string);
            dashboard.handle(DashboardEvent::FilterSelected { kind, value });
            render(dashboard)
        }
        "view.page" => {
            let page = params.get("page").and_then(|v| v.as_i64()).ok_or("missing page")?;
            dashboard.handle(DashboardEvent::PageChanged { page });
            render(dashboard)
        }
        "view.mode" => {
            let mode: ViewMode = params
                .get("mode")
                .cloned()
                .ok_or("missing mode")
                .and_then(|v| serde_json::from_value(v).map_err(|_| "invalid mode"))?;
            dashboard.handle(DashboardEvent::ViewModeChanged { mode });
            render(dashboard)
        }
        "viewport.resize" => {
            let width = params
                .get("width")
                .and_then(|v| v.as_u64())
                .ok_or("missing width")?;
            let width = u32::try_from(width).unwrap_or(u32::MAX);
            dashboard.handle(DashboardEvent::ViewportResized { width });
            render(dashboard)
        }

        // ─── Capture ───
        "capture.drop" => {
            let uri = str_param(params, "uri")?;
            dashboard.handle(DashboardEvent::UriDropped { uri: uri.to_string() });
            render(dashboard)
        }
        "capture.open" => {
            dashboard.handle(DashboardEvent::AddRequested);
            render(dashboard)
        }
        "capture.close" => {
            dashboard.handle(DashboardEvent::ModalClosed);
            render(dashboard)
        }

        // ─── Bookmarks ───
        "bookmark.edit" => {
            let id = params.get("id").and_then(|v| v.as_str()).map(str::to_string);
            if let Some(ref wanted) = id {
                if dashboard.store().get_bookmark(wanted).is_none() {
                    return Err(format!("bookmark not found: {}", wanted));
                }
            }
            dashboard.handle(DashboardEvent::EditRequested { id });
            render(dashboard)
        }

        // ─── Settings ───
        "settings.get" => {
            let settings = dashboard.store().settings();
            let active_view = dashboard.store().view_state().active_view;
            Ok(json!({"locale": settings.locale, "activeView": active_view}))
        }
        "settings.patch" => {
            let patch: UserSettingsPatch =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid patch: {}", e))?;
            dashboard.set_user_setting(patch);
            Ok(json!({"ok": true}))
        }
        "config.get" => serde_json::to_value(dashboard.config()).map_err(|e| e.to_string()),

        // ─── Notifications ───
        "notifications.drain" => Ok(json!(dashboard.drain_notifications())),

        _ => Err(format!("unknown method: {}", method)),
    }
}

/// A backend call started by `bookmark.create`, on its way back to the session.
#[derive(Debug)]
pub struct FinishedCreate {
    id: Value,
    ticket: CreationTicket,
    result: Result<Bookmark, CreateError>,
}

/// One RPC connection: the dashboard, its config file and the channel that
/// carries finished backend calls back to the request loop.
pub struct RpcSession<B: CreationBackend> {
    dashboard: Dashboard<B>,
    config: ConfigEngine,
    finished: UnboundedSender<FinishedCreate>,
}

impl<B> RpcSession<B>
where
    B: CreationBackend + Clone + Send + Sync + 'static,
{
    pub fn new(
        dashboard: Dashboard<B>,
        config: ConfigEngine,
        finished: UnboundedSender<FinishedCreate>,
    ) -> Self {
        Self {
            dashboard,
            config,
            finished,
        }
    }

    pub fn dashboard(&self) -> &Dashboard<B> {
        &self.dashboard
    }

    /// Answers one request.
    ///
    /// Returns `None` for an admitted `bookmark.create`: its response is
    /// produced by [`RpcSession::complete`] once the backend call finishes. A
    /// create sent while another is in flight is answered at once with the
    /// `Busy` error. Must be called inside a tokio runtime.
    pub fn dispatch(&mut self, id: Value, method: &str, params: &Value) -> Option<Value> {
        let result = match method {
            "bookmark.create" => match self.start_create(id.clone(), params) {
                Ok(()) => return None,
                Err(e) => Err(e),
            },
            "config.set" => self.set_config(params),
            "config.reset" => self.reset_config(),
            _ => handle_method(&mut self.dashboard, method, params),
        };
        Some(response(id, result))
    }

    /// Merges a finished backend call into the dashboard and builds the
    /// response to the `bookmark.create` that started it.
    pub fn complete(&mut self, finished: FinishedCreate) -> Value {
        let FinishedCreate { id, ticket, result } = finished;
        let outcome = self.dashboard.finish_submit(ticket, result);
        let notifications = self.dashboard.drain_notifications();
        let body = match outcome {
            CreationOutcome::Created(bookmark) => json!({
                "ok": true,
                "bookmark": bookmark,
                "notifications": notifications,
            }),
            CreationOutcome::Failed(error) => json!({
                "ok": false,
                "error": error,
                "notifications": notifications,
            }),
        };
        response(id, Ok(body))
    }

    /// Admits the submission and hands the backend call to a new task.
    /// Without a `url` param the capture modal's pending URL is submitted.
    fn start_create(&mut self, id: Value, params: &Value) -> Result<(), String> {
        let url = match params.get("url").and_then(|v| v.as_str()) {
            Some(url) => url.to_string(),
            None => self.dashboard.capture().pending_url().to_string(),
        };
        let ticket = self.dashboard.begin_submit(&url).map_err(|e| e.to_string())?;
        let backend = self.dashboard.backend().clone();
        let finished = self.finished.clone();
        tokio::spawn(async move {
            let result = backend.create(ticket.request()).await;
            if finished.send(FinishedCreate { id, ticket, result }).is_err() {
                warn!("request loop gone, dropping creation result");
            }
        });
        Ok(())
    }

    fn set_config(&mut self, params: &Value) -> Result<Value, String> {
        let key = str_param(params, "key")?;
        let value = params.get("value").cloned().ok_or("missing value")?;
        let config = self
            .config
            .set_value(key, value)
            .map_err(|e| e.to_string())?
            .clone();
        self.dashboard.apply_config(config);
        serde_json::to_value(self.dashboard.config()).map_err(|e| e.to_string())
    }

    fn reset_config(&mut self) -> Result<Value, String> {
        let config = self.config.reset().map_err(|e| e.to_string())?.clone();
        self.dashboard.apply_config(config);
        serde_json::to_value(self.dashboard.config()).map_err(|e| e.to_string())
    }
}
