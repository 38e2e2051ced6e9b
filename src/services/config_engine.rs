// Briefkasten Config Engine
// Owns the operator configuration file: read at startup, patched key by key over RPC,
// validated before anything is written back.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::platform;
use crate::types::errors::ConfigError;
use crate::types::settings::DashboardConfig;

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "BRIEFKASTEN_API_URL";

/// Largest accepted `base_page_size`.
pub const MAX_BASE_PAGE_SIZE: usize = 1000;

/// Trait defining the config engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<DashboardConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &DashboardConfig;
    fn set_value(&mut self, key: &str, value: Value) -> Result<&DashboardConfig, ConfigError>;
    fn reset(&mut self) -> Result<&DashboardConfig, ConfigError>;
    fn get_config_path(&self) -> &str;
}

/// Config engine backed by a JSON file.
pub struct ConfigEngine {
    config_path: String,
    config: DashboardConfig,
    /// File value of `api_base_url` while an environment override is active.
    shadowed_api_url: Option<String>,
}

/// Checks the invariants serde cannot express.
pub fn validate(config: &DashboardConfig) -> Result<(), ConfigError> {
    if !(1..=MAX_BASE_PAGE_SIZE).contains(&config.base_page_size) {
        return Err(ConfigError::InvalidValue(format!(
            "base_page_size must be between 1 and {}",
            MAX_BASE_PAGE_SIZE
        )));
    }
    if !(config.api_base_url.starts_with("http://") || config.api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(format!(
            "api_base_url must be an http(s) URL, got '{}'",
            config.api_base_url
        )));
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::InvalidValue(
            "request_timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

impl ConfigEngine {
    /// Uses `path_override` when given, otherwise `config.json` in the platform config dir.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("config.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            config: DashboardConfig::default(),
            shadowed_api_url: None,
        }
    }

    /// Applies environment overrides on top of the loaded config. Not persisted.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::var(API_URL_ENV).ok());
    }

    fn apply_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            let file_url = std::mem::replace(&mut self.config.api_base_url, url);
            self.shadowed_api_url.get_or_insert(file_url);
        }
    }
}

impl ConfigEngineTrait for ConfigEngine {
    /// A missing file yields defaults. A file that parses but breaks an
    /// invariant is rejected like a malformed one, and the engine keeps its
    /// previous config.
    fn load(&mut self) -> Result<DashboardConfig, ConfigError> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.config_path, "config file missing, using defaults");
                self.config = DashboardConfig::default();
                self.shadowed_api_url = None;
                return Ok(self.config.clone());
            }
            Err(e) => return Err(ConfigError::IoError(format!("{}: {}", self.config_path, e))),
        };

        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        validate(&config)?;

        self.config = config;
        self.shadowed_api_url = None;
        Ok(self.config.clone())
    }

    /// Writes the config, keeping the file's own `api_base_url` when an
    /// environment override is active.
    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        let mut on_disk = self.config.clone();
        if let Some(url) = &self.shadowed_api_url {
            on_disk.api_base_url.clone_from(url);
        }
        let json = serde_json::to_string_pretty(&on_disk)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))
    }

    fn get_config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Replaces one field of the flat config and persists the result.
    ///
    /// The candidate is rebuilt through serde, so a value of the wrong type is
    /// rejected, then validated. On any error the current config is unchanged.
    fn set_value(&mut self, key: &str, value: Value) -> Result<&DashboardConfig, ConfigError> {
        let mut fields = match serde_json::to_value(&self.config) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(ConfigError::SerializationError(
                    "config did not serialize to an object".to_string(),
                ))
            }
            Err(e) => return Err(ConfigError::SerializationError(e.to_string())),
        };
        match fields.get_mut(key) {
            Some(slot) => *slot = value,
            None => return Err(ConfigError::InvalidKey(key.to_string())),
        }

        let candidate: DashboardConfig = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", key, e)))?;
        validate(&candidate)?;

        self.config = candidate;
        if key == "api_base_url" {
            self.shadowed_api_url = None;
        }
        self.save()?;
        info!(%key, "config value updated");
        Ok(&self.config)
    }

    fn reset(&mut self) -> Result<&DashboardConfig, ConfigError> {
        self.config = DashboardConfig::default();
        self.shadowed_api_url = None;
        self.save()?;
        info!("config reset to defaults");
        Ok(&self.config)
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
