// Application configuration
// Loaded from a JSON file in the user's config directory, then overridden by env vars

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "youtube-music-queue";
const CONFIG_FILE_NAME: &str = "config.json";

// Environment variables checked by apply_env_overrides()
pub const ENV_API_BASE: &str = "YTMQ_API_BASE";
pub const ENV_API_KEY: &str = "YTMQ_API_KEY";
pub const ENV_HL: &str = "YTMQ_HL";
pub const ENV_GL: &str = "YTMQ_GL";
pub const ENV_PREFETCH_THRESHOLD: &str = "YTMQ_PREFETCH_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the InnerTube API, without trailing slash
    pub api_base: String,
    pub api_key: Option<String>,
    pub client_name: String,
    pub client_version: String,
    /// Interface language sent in the InnerTube context
    pub hl: String,
    /// Content region sent in the InnerTube context
    pub gl: String,
    pub request_timeout_secs: u64,
    /// Fetch the next radio page once this many upcoming items (or fewer) remain
    pub prefetch_threshold: usize,
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base: "https://music.youtube.com/youtubei/v1".to_string(),
            api_key: None,
            client_name: "WEB_REMIX".to_string(),
            client_version: "1.20240918.01.00".to_string(),
            hl: "en".to_string(),
            gl: "US".to_string(),
            request_timeout_secs: 15,
            prefetch_threshold: 3,
            history_limit: 50,
        }
    }
}

impl AppConfig {
    // Get the per-user config directory (not created here)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    // Load the user's config file (defaults if missing) and apply env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            AppConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    // Apply overrides from any key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup(ENV_API_BASE) {
            self.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = Some(api_key).filter(|key| !key.is_empty());
        }
        if let Some(hl) = lookup(ENV_HL) {
            self.hl = hl;
        }
        if let Some(gl) = lookup(ENV_GL) {
            self.gl = gl;
        }
        if let Some(raw) = lookup(ENV_PREFETCH_THRESHOLD) {
            match raw.trim().parse() {
                Ok(threshold) => self.prefetch_threshold = threshold,
                Err(e) => tracing::warn!(value = %raw, "ignoring {}: {}", ENV_PREFETCH_THRESHOLD, e),
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "hl": "fr", "prefetch_threshold": 7 }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.hl, "fr");
        assert_eq!(config.prefetch_threshold, 7);
        assert_eq!(config.gl, "US");
        assert_eq!(config.client_name, "WEB_REMIX");
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            api_key: Some("abc".to_string()),
            history_limit: 10,
            ..AppConfig::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn overrides_replace_fields() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE, "http://localhost:9000/youtubei/v1/"),
            (ENV_API_KEY, "key-123"),
            (ENV_GL, "DE"),
            (ENV_PREFETCH_THRESHOLD, "5"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base, "http://localhost:9000/youtubei/v1");
        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.gl, "DE");
        assert_eq!(config.hl, "en");
        assert_eq!(config.prefetch_threshold, 5);
    }

    #[test]
    fn bad_numeric_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| {
            (key == ENV_PREFETCH_THRESHOLD).then(|| "lots".to_string())
        });
        assert_eq!(config.prefetch_threshold, 3);
    }
}
