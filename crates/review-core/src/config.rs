//! Configuration types for Radar Review.

use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for an evaluation session and the tools around it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Persistent storage configuration.
    pub storage: StorageConfig,

    /// View mounting and output configuration.
    pub view: ViewConfig,

    /// Interaction settings.
    pub session: SessionSettings,
}

impl SessionConfig {
    /// Loads settings from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file exists but cannot be read and
    /// [`SessionError::Config`] if it is not valid TOML for these settings.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parses settings from TOML text. Missing sections and keys take defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| SessionError::Config(e.to_string()))
    }
}

/// Persistent storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the evaluation database.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./review_store.db"),
        }
    }
}

/// View configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Id of the container element the view mounts into.
    pub mount_id: String,

    /// Directory export files are written to.
    pub output_dir: PathBuf,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mount_id: "app".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Interaction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Ask for confirmation before a reset.
    pub confirm_reset: bool,

    /// Role used when none is given explicitly.
    pub default_role: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            confirm_reset: true,
            default_role: "software_engineer".to_string(),
        }
    }
}
