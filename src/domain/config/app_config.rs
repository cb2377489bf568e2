//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recordings service used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the recordings service
    pub api_url: Option<String>,
    /// Where local downloads are written
    pub download_dir: Option<PathBuf>,
    /// Desktop notifications in addition to terminal output
    pub notify: Option<bool>,
    /// Display to capture (driver-specific, e.g. `:0.0`)
    pub display: Option<String>,
    /// Capture system audio together with the display
    pub system_audio: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_url: Some(DEFAULT_API_URL.to_string()),
            download_dir: None,
            notify: Some(false),
            display: None,
            system_audio: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            download_dir: other.download_dir.or(self.download_dir),
            notify: other.notify.or(self.notify),
            display: other.display.or(self.display),
            system_audio: other.system_audio.or(self.system_audio),
        }
    }

    /// Get the service base URL without a trailing slash
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Get the download directory, falling back to the user's Downloads
    /// folder and then the current directory
    pub fn download_dir_or_default(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get system audio setting, or true if not set
    pub fn system_audio_or_default(&self) -> bool {
        self.system_audio.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.api_url, Some("http://localhost:5000".to_string()));
        assert_eq!(config.notify, Some(false));
        assert_eq!(config.system_audio, Some(true));
        assert!(config.download_dir.is_none());
        assert!(config.display.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_url.is_none());
        assert!(config.download_dir.is_none());
        assert!(config.notify.is_none());
        assert!(config.display.is_none());
        assert!(config.system_audio.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_url: Some("http://base:5000".to_string()),
            display: Some(":0.0".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            api_url: Some("http://other:8080".to_string()),
            display: None, // Should not override
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_url, Some("http://other:8080".to_string()));
        assert_eq!(merged.display, Some(":0.0".to_string())); // Kept from base
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            download_dir: Some(PathBuf::from("/tmp/videos")),
            system_audio: Some(false),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.download_dir, Some(PathBuf::from("/tmp/videos")));
        assert_eq!(merged.system_audio, Some(false));
    }

    #[test]
    fn api_url_or_default_falls_back() {
        assert_eq!(AppConfig::empty().api_url_or_default(), DEFAULT_API_URL);

        let blank = AppConfig {
            api_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.api_url_or_default(), DEFAULT_API_URL);
    }

    #[test]
    fn api_url_or_default_trims_trailing_slash() {
        let config = AppConfig {
            api_url: Some("https://rec.example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_url_or_default(), "https://rec.example.com");
    }

    #[test]
    fn download_dir_prefers_configured_value() {
        let config = AppConfig {
            download_dir: Some(PathBuf::from("/srv/recordings")),
            ..Default::default()
        };
        assert_eq!(config.download_dir_or_default(), PathBuf::from("/srv/recordings"));
    }

    #[test]
    fn boolean_defaults() {
        let config = AppConfig::empty();
        assert!(!config.notify_or_default());
        assert!(config.system_audio_or_default());
    }
}
