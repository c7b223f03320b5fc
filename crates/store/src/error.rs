//! Error types for store operations.
//!
//! This module defines the errors a store can report: unknown identifiers,
//! database and file system failures, and use after close.

use std::path::PathBuf;

use lazytodo_model::{ListId, TaskId};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No list with the given ID exists.
    #[error("todo list not found: {0}")]
    ListNotFound(ListId),

    /// No task with the given ID exists in the given list.
    #[error("task {task} not found in list {list}")]
    TaskNotFound {
        /// The list that was searched.
        list: ListId,
        /// The missing task.
        task: TaskId,
    },

    /// The SQLite database reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A file could not be read, written or renamed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON data file could not be parsed or written.
    #[error("invalid JSON data in {path}: {source}")]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be resolved.
    #[error(transparent)]
    Config(#[from] lazytodo_config::ConfigError),

    /// The store was used after [`Store::close`](crate::Store::close).
    #[error("store is closed")]
    Closed,
}

impl StoreError {
    /// Builds an [`StoreError::Io`] for `path`.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by an unknown list or task ID.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ListNotFound(_) | Self::TaskNotFound { .. })
    }
}

/// A specialized Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            StoreError::ListNotFound(ListId::from("12")).to_string(),
            "todo list not found: 12"
        );
        assert_eq!(
            StoreError::TaskNotFound {
                list: ListId::from("1"),
                task: TaskId::from("2"),
            }
            .to_string(),
            "task 2 not found in list 1"
        );
        assert_eq!(StoreError::Closed.to_string(), "store is closed");
    }

    #[test]
    fn not_found_classification() {
        assert!(StoreError::ListNotFound(ListId::from("x")).is_not_found());
        assert!(!StoreError::Closed.is_not_found());
    }
}
