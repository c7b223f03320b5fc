//! Log output configuration.
//!
//! The terminal belongs to the UI, so logs always go to a file. The level is
//! a `tracing` filter directive; `LAZYTODO_LOG` overrides it at runtime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log file name inside the data directory.
pub const DEFAULT_LOG_FILE: &str = "lazytodo.log";

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level to record (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file path; defaults to `lazytodo.log` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Filter directive from the environment, e.g. `lazytodo_store=debug`.
    /// Takes precedence over `level` and is never written to disk.
    #[serde(skip)]
    pub filter: Option<String>,
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
            filter: None,
        }
    }
}

impl LoggingConfig {
    /// Returns the log file path for the given data directory.
    #[must_use]
    pub fn log_file(&self, data_dir: &Path) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_LOG_FILE))
    }

    /// The `tracing` filter directive to install.
    #[must_use]
    pub fn directive(&self) -> &str {
        self.filter.as_deref().unwrap_or(&self.level)
    }

    /// Checks that the level is one `tracing` understands.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let level = self.level.to_ascii_lowercase();
        if LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidLogLevel(self.level.clone()))
        }
    }
}
