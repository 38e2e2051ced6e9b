//! Hydration snapshot loading.
//!
//! The server-rendering side hands the dashboard one JSON snapshot per
//! session: bookmarks with categories and tags resolved, category and tag
//! counts, and the authenticated user (if any).

use std::fs;
use std::path::Path;

use crate::types::errors::SnapshotError;
use crate::types::snapshot::HydrationSnapshot;

/// Parses a snapshot from JSON text.
pub fn parse_snapshot(json: &str) -> Result<HydrationSnapshot, SnapshotError> {
    serde_json::from_str(json).map_err(|e| SnapshotError::ParseError(e.to_string()))
}

/// Reads and parses a snapshot file.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<HydrationSnapshot, SnapshotError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| SnapshotError::IoError(format!("{}: {}", path.display(), e)))?;
    parse_snapshot(&content)
}
