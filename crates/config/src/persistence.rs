//! Configuration file discovery, reading and writing.
//!
//! Files are parsed as JSON5, which also accepts plain JSON. Writing always
//! produces pretty-printed JSON since `serde_json5` cannot serialize.
//!
//! # File Locations
//!
//! Searched in order, first match wins:
//!
//! 1. Working directory: `./lazytodo.json5`, `./lazytodo.json`
//! 2. User config directory: `~/.config/lazytodo/config.json5`,
//!    `~/.config/lazytodo/config.json`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// File names looked up in the working directory.
const LOCAL_FILE_NAMES: &[&str] = &["lazytodo.json5", "lazytodo.json"];

/// Directory under the platform config directory.
const USER_CONFIG_DIR: &str = "lazytodo";

/// File names looked up in the user config directory.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file to load, if any.
///
/// # Examples
///
/// ```no_run
/// use lazytodo_config::persistence::find_config_file;
///
/// match find_config_file() {
///     Some(path) => println!("using {}", path.display()),
///     None => println!("using built-in defaults"),
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR));
    find_config_file_in(Path::new("."), user_dir.as_deref())
}

/// Searches `local_dir` and then `user_dir` for a configuration file.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    let found = local.chain(user).find(|path| path.is_file());
    debug!(?found, "config file lookup");
    found
}

/// Returns the user configuration directory (`~/.config/lazytodo` on Linux).
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the path new user configuration is written to.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_file_in(&user_config_dir()?))
}

/// Returns the path new configuration is written to inside `user_dir`.
#[must_use]
pub fn user_config_file_in(user_dir: &Path) -> PathBuf {
    user_dir.join(USER_FILE_NAMES[0])
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse as `T`.
///
/// # Examples
///
/// ```no_run
/// use lazytodo_config::Config;
/// use lazytodo_config::persistence::read_config_file;
///
/// # fn main() -> lazytodo_config::Result<()> {
/// let config: Config = read_config_file("lazytodo.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    debug!(?path, "reading config file");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Writes a value as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    debug!(?path, "writing config file");
    std::fs::write(path, content).map_err(write_error)
}
