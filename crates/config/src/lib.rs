//! Configuration management for lazytodo.
//!
//! This crate handles loading, validating, and persisting configuration
//! from files, environment variables and defaults. It covers where data is
//! stored and how logs are written; the user-facing task settings (reminder
//! window, show-completed) live with the data itself.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`storage`]: Backend selection and data directory resolution
//! - [`logging`]: Log level and log file location
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`LAZYTODO_DATA_DIR`, `LAZYTODO_BACKEND`, `LAZYTODO_LOG`)
//! 2. Local config (`./lazytodo.json5` or `./lazytodo.json`)
//! 3. User config (`~/.config/lazytodo/config.json5` or `~/.config/lazytodo/config.json`)
//! 4. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   storage: {
//!     backend: "sqlite", // or "json"
//!     data_dir: "~/.lazytodo",
//!   },
//!   logging: { level: "info" },
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use logging::LoggingConfig;
pub use storage::{Backend, StorageConfig};
