//! Configuration handling for the customer form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Quiescence window for the email message, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
/// Lowest accepted rating
pub const DEFAULT_RATING_MIN: f64 = 1.0;
/// Highest accepted rating
pub const DEFAULT_RATING_MAX: f64 = 5.0;

/// User configuration for the customer form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Email message debounce window in milliseconds
    pub debounce_ms: Option<u64>,
    /// Lower bound of the rating range
    pub rating_min: Option<f64>,
    /// Upper bound of the rating range
    pub rating_max: Option<f64>,
    /// Pretty-print saved snapshots in the log
    pub pretty_save: Option<bool>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "customer-form", "customer-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FormConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    /// Rating bounds, falling back to the defaults when unset or inverted
    pub fn rating_bounds(&self) -> (f64, f64) {
        let min = self.rating_min.unwrap_or(DEFAULT_RATING_MIN);
        let max = self.rating_max.unwrap_or(DEFAULT_RATING_MAX);
        if min <= max {
            (min, max)
        } else {
            tracing::warn!("Ignoring inverted rating range [{min}, {max}]");
            (DEFAULT_RATING_MIN, DEFAULT_RATING_MAX)
        }
    }

    pub fn pretty_save(&self) -> bool {
        self.pretty_save.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert!(config.debounce_ms.is_none());
        assert!(config.rating_min.is_none());
        assert!(config.rating_max.is_none());
        assert!(config.pretty_save.is_none());
    }

    #[test]
    fn test_defaults_applied() {
        let config = FormConfig::default();
        assert_eq!(config.debounce_window(), Duration::from_millis(1000));
        assert_eq!(config.rating_bounds(), (1.0, 5.0));
        assert!(!config.pretty_save());
    }

    #[test]
    fn test_serialization() {
        let config = FormConfig {
            debounce_ms: Some(250),
            rating_min: Some(0.0),
            rating_max: Some(10.0),
            pretty_save: Some(true),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.debounce_ms, Some(250));
        assert_eq!(parsed.rating_min, Some(0.0));
        assert_eq!(parsed.rating_max, Some(10.0));
        assert_eq!(parsed.pretty_save, Some(true));
        assert_eq!(parsed.debounce_window(), Duration::from_millis(250));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.debounce_ms.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"debounce_ms": 500, "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.debounce_ms, Some(500));
    }

    #[test]
    fn test_inverted_rating_range_falls_back() {
        let config = FormConfig {
            rating_min: Some(5.0),
            rating_max: Some(1.0),
            ..Default::default()
        };
        assert_eq!(config.rating_bounds(), (1.0, 5.0));
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        if let Some(path) = FormConfig::config_path() {
            assert!(path.ends_with("config.json"));
        }
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let tmp = tempdir().unwrap();
        let config = FormConfig::load_from(&tmp.path().join("config.json")).unwrap();
        assert!(config.debounce_ms.is_none());
        assert_eq!(config.rating_bounds(), (1.0, 5.0));
    }

    #[test]
    fn test_save_then_load() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.json");
        let config = FormConfig {
            debounce_ms: Some(300),
            pretty_save: Some(true),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let loaded = FormConfig::load_from(&path).unwrap();

        assert_eq!(loaded.debounce_window(), Duration::from_millis(300));
        assert!(loaded.pretty_save());
        assert!(loaded.rating_min.is_none());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(FormConfig::load_from(&path).is_err());
    }
}
