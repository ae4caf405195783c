//! Console settings.
//!
//! Resolved from, lowest to highest precedence: built-in defaults, the
//! settings file (`~/.config/herald/config.toml`), environment variables,
//! and explicit overrides from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use herald_core::error::{HeraldError, Result};
use serde::{Deserialize, Serialize};

use crate::http_gateway::{HttpBackendGateway, normalize_base_url};
use crate::paths::HeraldPaths;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;
pub const MIN_TIMEOUT_MS: u64 = 250;

pub const ENV_BACKEND_URL: &str = "HERALD_BACKEND_URL";
pub const ENV_TIMEOUT_MS: &str = "HERALD_TIMEOUT_MS";

/// Contents of the settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub settings_path: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

/// Fully resolved console settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub backend_url: String,
    pub request_timeout_ms: u64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ConsoleSettings {
    /// Loads settings from the file, the process environment and `overrides`.
    pub fn load(overrides: &SettingsOverrides) -> Result<Self> {
        let path = match &overrides.settings_path {
            Some(path) => path.clone(),
            None => HeraldPaths::settings_file()?,
        };
        let file = read_settings_file(&path)?;
        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Layers the sources. `env` looks up one environment variable.
    pub fn resolve<F>(file: SettingsFile, env: F, overrides: &SettingsOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = file.backend_url {
            settings.backend_url = url;
        }
        if let Some(timeout_ms) = file.request_timeout_ms {
            settings.request_timeout_ms = timeout_ms;
        }

        if let Some(url) = env(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            settings.backend_url = url;
        }
        if let Some(raw) = env(ENV_TIMEOUT_MS).filter(|v| !v.trim().is_empty()) {
            settings.request_timeout_ms = raw.trim().parse().map_err(|_| {
                HeraldError::config(format!("{} must be a number of milliseconds", ENV_TIMEOUT_MS))
            })?;
        }

        if let Some(url) = &overrides.backend_url {
            settings.backend_url = url.clone();
        }
        if let Some(timeout_ms) = overrides.request_timeout_ms {
            settings.request_timeout_ms = timeout_ms;
        }

        settings.backend_url = normalize_base_url(&settings.backend_url)?;
        settings.request_timeout_ms = settings.request_timeout_ms.max(MIN_TIMEOUT_MS);
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Builds the HTTP gateway these settings describe.
    pub fn gateway(&self) -> Result<HttpBackendGateway> {
        HttpBackendGateway::new(&self.backend_url, self.request_timeout())
    }
}

/// Reads the settings file; a missing file yields defaults.
pub fn read_settings_file(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        HeraldError::config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| HeraldError::config(format!("Failed to parse {}: {}", path.display(), e)))
}
