use serde::{Deserialize, Serialize};

use super::view::{ViewMode, DEFAULT_PAGE_SIZE};

/// Locale recorded when the environment offers none.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Per-session user settings held by the collection store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    pub locale: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Partial update applied by `set_user_setting`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsPatch {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub active_view: Option<ViewMode>,
}

impl UserSettingsPatch {
    pub fn locale(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            ..Self::default()
        }
    }

    pub fn active_view(view: ViewMode) -> Self {
        Self {
            active_view: Some(view),
            ..Self::default()
        }
    }
}

/// Operator configuration for a dashboard process, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub base_page_size: usize,
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_toast_duration() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001".to_string(),
            base_page_size: DEFAULT_PAGE_SIZE,
            toast_duration_ms: default_toast_duration(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}
