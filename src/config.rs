//! Runtime settings shared by the CLI and the GUI.

use std::path::PathBuf;
use std::time::Duration;

/// Default REST Countries endpoint (v3.1).
pub const DEFAULT_API_BASE: &str = "https://restcountries.com/v3.1";

/// Where to reach the API, how to format numbers, and where favorites live.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    /// Locale tag for number grouping (`en`, `de`, ...). See `format::map_locale`.
    pub locale: String,
    /// Backing file of the persistent key-value storage.
    pub storage_path: PathBuf,
    /// Total request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            locale: "en".into(),
            storage_path: default_storage_path(),
            timeout: None,
        }
    }
}

/// `<data_dir>/countries-rs/storage.json`, or `./countries-rs/storage.json` when the
/// platform reports no data directory.
pub fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("countries-rs")
        .join("storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.api_base, DEFAULT_API_BASE);
        assert_eq!(s.locale, "en");
        assert!(s.timeout.is_none());
        assert!(s.storage_path.ends_with("countries-rs/storage.json"));
    }
}
