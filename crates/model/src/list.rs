//! The todo list entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ListId, TaskId};
use crate::task::Task;

/// A named collection of tasks, ordered by creation.
///
/// # Examples
///
/// ```
/// use lazytodo_model::{Task, TaskDraft, TodoList};
///
/// let mut list = TodoList::new("Groceries", "");
/// assert_eq!(list.progress(), 0.0);
///
/// list.tasks.push(Task::new(TaskDraft::new("Milk")));
/// list.tasks.push(Task::new(TaskDraft::new("Eggs")));
/// list.tasks[0].completed = true;
/// assert_eq!(list.progress(), 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique identifier.
    pub id: ListId,
    /// Display name.
    pub name: String,
    /// Optional description, empty when absent.
    #[serde(default)]
    pub description: String,
    /// Tasks in creation order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
    /// When the list was last modified.
    pub updated_at: DateTime<Utc>,
}

impl TodoList {
    /// Creates an empty list with a freshly generated ID.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(ListId::generate(), name, description, Utc::now())
    }

    /// Creates an empty list with an explicit ID and creation time.
    #[must_use]
    pub fn with_id(
        id: ListId,
        name: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Total number of tasks.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    /// Completion percentage in `0.0..=100.0`; an empty list reports `0.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / total as f64 * 100.0
    }

    /// Looks up a task by ID.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Looks up a task by ID for modification.
    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    /// Removes a task, returning it if it was present.
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| &task.id == id)?;
        Some(self.tasks.remove(index))
    }
}
