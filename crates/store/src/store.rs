//! The storage abstraction shared by all backends.

use std::fmt;
use std::path::PathBuf;

use lazytodo_model::{Application, ListId, TaskDraft, TaskId};

use crate::error::Result;

/// The kind of backing storage, used when describing a store to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// A SQLite database file.
    Database,
    /// A single JSON document.
    JsonFile,
}

/// Where a store keeps its data.
///
/// Displays as `Database: <path>` or `JSON File: <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDescriptor {
    /// The backend kind.
    pub kind: StoreKind,
    /// The file holding the data.
    pub path: PathBuf,
}

impl fmt::Display for StoreDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            StoreKind::Database => "Database",
            StoreKind::JsonFile => "JSON File",
        };
        write!(f, "{label}: {}", self.path.display())
    }
}

/// Durable storage for lists, tasks and settings.
///
/// Mutating operations receive the caller's in-memory snapshot. They write to
/// the backing storage first and update the snapshot only once that write
/// succeeded; on error the snapshot is left untouched. An unknown list or task
/// ID is reported as [`StoreError::ListNotFound`] or
/// [`StoreError::TaskNotFound`].
///
/// After [`close`](Store::close) every operation fails with
/// [`StoreError::Closed`].
///
/// [`StoreError::ListNotFound`]: crate::StoreError::ListNotFound
/// [`StoreError::TaskNotFound`]: crate::StoreError::TaskNotFound
/// [`StoreError::Closed`]: crate::StoreError::Closed
pub trait Store: Send {
    /// Describes where the data lives.
    fn describe(&self) -> StoreDescriptor;

    /// Reads every list, task and the settings. Lists and the tasks within
    /// each list come back in creation order.
    fn load(&mut self) -> Result<Application>;

    /// Persists the whole snapshot, including settings.
    fn save(&mut self, app: &Application) -> Result<()>;

    /// Creates an empty list and appends it to the snapshot.
    fn create_list(&mut self, app: &mut Application, name: &str, description: &str)
    -> Result<ListId>;

    /// Renames a list and replaces its description.
    fn update_list(
        &mut self,
        app: &mut Application,
        id: &ListId,
        name: &str,
        description: &str,
    ) -> Result<()>;

    /// Deletes a list together with all of its tasks.
    fn delete_list(&mut self, app: &mut Application, id: &ListId) -> Result<()>;

    /// Creates an incomplete task at the end of a list.
    fn create_task(
        &mut self,
        app: &mut Application,
        list: &ListId,
        draft: TaskDraft,
    ) -> Result<TaskId>;

    /// Replaces the editable fields of a task.
    fn update_task(
        &mut self,
        app: &mut Application,
        list: &ListId,
        task: &TaskId,
        draft: TaskDraft,
    ) -> Result<()>;

    /// Flips the completed flag of a task and returns the new value.
    fn toggle_task(&mut self, app: &mut Application, list: &ListId, task: &TaskId)
    -> Result<bool>;

    /// Deletes a task.
    fn delete_task(&mut self, app: &mut Application, list: &ListId, task: &TaskId) -> Result<()>;

    /// Releases the backing storage.
    fn close(&mut self) -> Result<()>;
}
