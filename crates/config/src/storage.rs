//! Storage backend selection and data directory resolution.
//!
//! # Data Directory
//!
//! Unless configured otherwise, data lives in `~/.lazytodo/`. A leading `~`
//! in a configured path is expanded to the home directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Name of the default data directory under the home directory.
pub const DEFAULT_DATA_DIR_NAME: &str = ".lazytodo";

/// Which persistence backend to use.
///
/// # Examples
///
/// ```
/// use lazytodo_config::Backend;
///
/// assert_eq!("json".parse::<Backend>().unwrap(), Backend::Json);
/// assert_eq!(Backend::default(), Backend::Sqlite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Embedded SQLite database (`lazytodo.db`).
    #[default]
    Sqlite,
    /// Single JSON file (`lazytodo.json`).
    Json,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => f.write_str("sqlite"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "db" | "database" => Ok(Self::Sqlite),
            "json" | "file" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend used for lists, tasks and settings.
    #[serde(default)]
    pub backend: Backend,

    /// Directory holding the data files. Defaults to `~/.lazytodo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Returns the directory the store should use, expanding `~`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] if the home directory is
    /// needed but unknown.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => expand_home(dir),
            None => default_data_dir(),
        }
    }

    /// Checks the configured values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDataDir`] for an empty `data_dir`.
    pub fn validate(&self) -> Result<()> {
        match &self.data_dir {
            Some(dir) if dir.as_os_str().is_empty() => Err(ConfigError::EmptyDataDir),
            _ => Ok(()),
        }
    }
}

/// Returns `~/.lazytodo`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the home directory is unknown.
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DATA_DIR_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or(ConfigError::NoHomeDirectory),
        Err(_) => Ok(path.to_path_buf()),
    }
}
