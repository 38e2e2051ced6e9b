// Briefkasten platform paths
// Resolves the per-user configuration directory for Linux, macOS and Windows.

use std::env;
use std::path::PathBuf;

/// Returns the platform-specific configuration directory for Briefkasten.
///
/// - **Linux**: `$XDG_CONFIG_HOME/briefkasten` or `~/.config/briefkasten`
/// - **macOS**: `~/Library/Application Support/Briefkasten`
/// - **Windows**: `%APPDATA%/Briefkasten`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("Briefkasten")
    }
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
            .join("Briefkasten")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("briefkasten"),
            _ => home_dir().join(".config").join("briefkasten"),
        }
    }
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}
