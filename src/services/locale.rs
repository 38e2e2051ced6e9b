//! Ambient locale detection.
//!
//! Reads the environment's ordered locale preference list and picks the first
//! usable entry, normalized to `language-REGION` form.

use crate::types::settings::DEFAULT_LOCALE;

/// Source of the runtime's locale preferences, most preferred first.
pub trait LocaleSource {
    fn preferred_locales(&self) -> Vec<String>;
}

/// Reads `LC_ALL`, `LC_MESSAGES`, `LANG` and then each entry of `LANGUAGE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocaleSource;

impl LocaleSource for EnvLocaleSource {
    fn preferred_locales(&self) -> Vec<String> {
        let mut out = Vec::new();
        for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
            if let Ok(value) = std::env::var(var) {
                out.push(value);
            }
        }
        if let Ok(language) = std::env::var("LANGUAGE") {
            out.extend(language.split(':').map(str::to_string));
        }
        out
    }
}

/// Fixed preference list, useful when the host supplies locales directly.
#[derive(Debug, Clone, Default)]
pub struct StaticLocaleSource(pub Vec<String>);

impl LocaleSource for StaticLocaleSource {
    fn preferred_locales(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Normalizes `de_DE.UTF-8@euro` to `de-DE`. Returns `None` for empty,
/// `C` and `POSIX` values.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .trim();
    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }

    let mut parts = base.split(['_', '-']).filter(|p| !p.is_empty());
    let language = parts.next()?.to_ascii_lowercase();
    match parts.next() {
        Some(region) => Some(format!("{}-{}", language, region.to_ascii_uppercase())),
        None => Some(language),
    }
}

/// Picks the first usable locale from `source`, falling back to `en-US`.
pub fn detect_locale(source: &dyn LocaleSource) -> String {
    source
        .preferred_locales()
        .iter()
        .find_map(|raw| normalize_locale(raw))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}
