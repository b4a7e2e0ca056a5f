use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "NEWS_API_URL";

const APP_DIR: &str = "newshub";
const CONFIG_FILE: &str = "config.json";

/// Zero in the file would mean "time out at once" or "probe in a busy loop".
const MIN_SECONDS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_seconds: u64,
    /// Upper bound on accumulated results; `None` keeps everything.
    pub max_retained_results: Option<usize>,
    pub health_check_interval_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            request_timeout_seconds: 10,
            max_retained_results: None,
            health_check_interval_seconds: 30,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(MIN_SECONDS))
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_seconds.max(MIN_SECONDS))
    }

    /// Default location: `<config dir>/newshub/config.json`.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the file at `path` (or the default location), falling back to
    /// defaults when it is missing or unreadable, then applies `NEWS_API_URL`.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file_path(),
        };
        let mut config = match path.and_then(|p| Self::load_from_file(&p)) {
            Ok(config) => config,
            Err(e) => {
                debug!(error = %e, "using default client configuration");
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "config file is not valid JSON");
                Err(e.into())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            self.apply_base_url(&url);
        }
    }

    /// Ignores blank values so an empty variable does not wipe the default.
    pub fn apply_base_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.base_url = url.to_owned();
        }
    }
}
