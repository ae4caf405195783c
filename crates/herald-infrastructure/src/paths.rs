//! Path management for Herald console files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/herald/            # Config directory
//! ├── config.toml              # Console settings (backend URL, timeout)
//! └── logs/                    # Interactive console logs
//!     └── herald-console.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use herald_core::error::{HeraldError, Result};

const APP_DIR: &str = "herald";
const SETTINGS_FILE: &str = "config.toml";
const LOG_DIR: &str = "logs";

pub struct HeraldPaths;

impl HeraldPaths {
    /// Returns the herald configuration directory (e.g. `~/.config/herald/`).
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| HeraldError::config("Cannot find home directory"))?;
        Ok(base.join(APP_DIR))
    }

    pub fn settings_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(LOG_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_config_dir() {
        // Only meaningful where a home directory exists
        if let Ok(config_dir) = HeraldPaths::config_dir() {
            assert!(config_dir.ends_with(APP_DIR));
            assert_eq!(
                HeraldPaths::settings_file().unwrap(),
                config_dir.join(SETTINGS_FILE)
            );
            assert_eq!(HeraldPaths::log_dir().unwrap(), config_dir.join(LOG_DIR));
        }
    }
}
