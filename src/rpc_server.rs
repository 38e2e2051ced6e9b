//! Briefkasten RPC Server: JSON-RPC over stdin/stdout for a dashboard front end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"view.search", "params":{"text":"rust"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! The hydration snapshot is read from the first argument or `BRIEFKASTEN_SNAPSHOT`.
//! Logs go to stderr, filtered by `BRIEFKASTEN_LOG` (default `info`).
//!
//! A `bookmark.create` response arrives when the backend answers; requests sent
//! in the meantime are served, and a second create gets the busy error.

use std::io::Write;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use briefkasten::app::Dashboard;
use briefkasten::rpc_handler::RpcSession;
use briefkasten::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use briefkasten::services::creation_backend::HttpCreationBackend;
use briefkasten::services::hydration::load_snapshot;
use briefkasten::services::locale::EnvLocaleSource;
use briefkasten::types::errors::SessionError;

fn init_logging() {
    let filter = EnvFilter::try_from_env("BRIEFKASTEN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit(value: &Value) {
    let mut out = std::io::stdout().lock();
    let _ = writeln!(out, "{}", value);
    let _ = out.flush();
}

#[tokio::main]
async fn main() {
    init_logging();

    let snapshot_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BRIEFKASTEN_SNAPSHOT").ok());
    let Some(snapshot_path) = snapshot_path else {
        error!("no snapshot given; pass a path or set BRIEFKASTEN_SNAPSHOT");
        std::process::exit(2);
    };

    let snapshot = match load_snapshot(&snapshot_path) {
        Ok(s) => s,
        Err(e) => {
            error!(path = %snapshot_path, error = %e, "failed to load snapshot");
            std::process::exit(1);
        }
    };

    let mut config_engine = ConfigEngine::new(std::env::var("BRIEFKASTEN_CONFIG").ok());
    if let Err(e) = config_engine.load() {
        error!(error = %e, "config unreadable, using defaults");
    }
    config_engine.apply_env_overrides();
    let config = config_engine.get_config().clone();

    let backend = match HttpCreationBackend::from_config(&config) {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "failed to build creation backend");
            std::process::exit(1);
        }
    };

    let dashboard = match Dashboard::start(snapshot, backend, config, &EnvLocaleSource) {
        Ok(d) => d,
        Err(SessionError::Unauthenticated { redirect }) => {
            emit(&json!({"event": "redirect", "location": redirect}));
            return;
        }
    };

    let (finished_tx, mut finished_rx) = mpsc::unbounded_channel();
    let mut session = RpcSession::new(dashboard, config_engine, finished_tx);

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    info!("rpc server ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    Ok(None) => break,
                    Err(e) => {
                        error!(error = %e, "stdin read failed");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let req: Value = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        emit(&json!({"id": null, "error": format!("parse error: {}", e)}));
                        continue;
                    }
                };

                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));

                if let Some(response) = session.dispatch(id, method, &params) {
                    emit(&response);
                }
            }
            Some(finished) = finished_rx.recv() => emit(&session.complete(finished)),
        }
    }

    // Answer a create that was still waiting on the backend
    if session.dashboard().pipeline().is_loading() {
        if let Some(finished) = finished_rx.recv().await {
            emit(&session.complete(finished));
        }
    }

    info!("stdin closed, shutting down");
}
