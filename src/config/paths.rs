//! Path management for the tariff advisor
//!
//! Provides XDG-compliant path resolution for configuration, the history log
//! and the delivery outbox.
//!
//! ## Path Resolution Order
//!
//! 1. `TARIFF_ADVISOR_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/tariff-advisor`
//! 3. Platform config directory (`~/.config/tariff-advisor`, `%APPDATA%\tariff-advisor`)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::AdvisorError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "TARIFF_ADVISOR_DATA_DIR";

const APP_DIR_NAME: &str = "tariff-advisor";

/// Manages all paths used by the tariff advisor
#[derive(Debug, Clone)]
pub struct AdvisorPaths {
    /// Base directory for all advisor data
    base_dir: PathBuf,
}

impl AdvisorPaths {
    /// Create a new AdvisorPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, AdvisorError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AdvisorPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (holds the history log)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the outbox directory used by the file-based transport
    pub fn outbox_dir(&self) -> PathBuf {
        self.base_dir.join("outbox")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the shared calculation history log
    pub fn history_file(&self) -> PathBuf {
        self.data_dir().join("history.csv")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), AdvisorError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AdvisorError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AdvisorError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.outbox_dir())
            .map_err(|e| AdvisorError::Io(format!("Failed to create outbox directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, AdvisorError> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
    }

    let dirs = BaseDirs::new()
        .ok_or_else(|| AdvisorError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR_NAME))
}
