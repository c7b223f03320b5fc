//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for lazytodo.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::logging::LoggingConfig;
use crate::persistence::{
    find_config_file, find_config_file_in, read_config_file, user_config_dir, user_config_file_in,
    write_config_file,
};
use crate::storage::StorageConfig;

/// Environment variable overriding [`StorageConfig::data_dir`].
pub const ENV_DATA_DIR: &str = "LAZYTODO_DATA_DIR";

/// Environment variable overriding [`StorageConfig::backend`].
pub const ENV_BACKEND: &str = "LAZYTODO_BACKEND";

/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG: &str = "LAZYTODO_LOG";

/// The main configuration struct.
///
/// # Examples
///
/// ```
/// use lazytodo_config::{Backend, Config};
///
/// let config = Config::default();
/// assert_eq!(config.storage.backend, Backend::Sqlite);
/// assert_eq!(config.logging.level, "info");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where and how data is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from the default file locations, then applies
    /// environment overrides.
    ///
    /// Falls back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found but cannot be read or parsed, or
    /// if the resulting configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lazytodo_config::Config;
    ///
    /// # fn example() -> lazytodo_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("backend: {}", config.storage.backend);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Writes the default configuration to the user config directory on
    /// first run, so there is a file to edit.
    ///
    /// Returns the path written, or `None` if a config file already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the user config directory is unknown or the file
    /// cannot be written.
    pub fn init_default() -> Result<Option<PathBuf>> {
        Self::init_default_in(Path::new("."), &user_config_dir()?)
    }

    /// Like [`init_default`](Self::init_default), looking for existing files
    /// in `local_dir` and `user_dir` and writing into `user_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn init_default_in(local_dir: &Path, user_dir: &Path) -> Result<Option<PathBuf>> {
        if find_config_file_in(local_dir, Some(user_dir)).is_some() {
            return Ok(None);
        }
        let path = user_config_file_in(user_dir);
        Self::default().save_to(&path)?;
        info!(?path, "wrote default configuration");
        Ok(Some(path))
    }

    /// Applies overrides looked up through `lookup` (normally the process
    /// environment): [`ENV_DATA_DIR`], [`ENV_BACKEND`] and [`ENV_LOG`].
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend override names an unknown backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazytodo_config::{Backend, Config};
    ///
    /// let mut config = Config::default();
    /// config
    ///     .apply_overrides(|key| (key == "LAZYTODO_BACKEND").then(|| "json".to_string()))
    ///     .unwrap();
    /// assert_eq!(config.storage.backend, Backend::Json);
    /// ```
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            debug!(%dir, "data dir overridden from environment");
            self.storage.data_dir = Some(dir.into());
        }
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.storage.backend = backend.parse()?;
        }
        if let Some(directive) = lookup(ENV_LOG) {
            self.logging.filter = Some(directive);
        }
        Ok(())
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
