//! Log file setup.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use lazytodo_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Installs a subscriber that appends plain-text logs to the configured file.
///
/// Returns the path being written to.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened, the filter directive
/// does not parse, or a subscriber is already installed.
pub fn init(config: &LoggingConfig, data_dir: &Path) -> Result<PathBuf> {
    let path = config.log_file(data_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(config.directive())
        .with_context(|| format!("invalid log filter '{}'", config.directive()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;
    Ok(path)
}
