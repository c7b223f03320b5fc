//! The full persisted snapshot.

use serde::{Deserialize, Serialize};

use crate::id::ListId;
use crate::list::TodoList;
use crate::settings::Settings;

/// Every list plus the settings: the unit that is loaded at startup and
/// kept in sync with the store afterwards.
///
/// # Examples
///
/// ```
/// use lazytodo_model::{Application, TodoList};
///
/// let mut app = Application::default();
/// let list = TodoList::new("Inbox", "");
/// let id = list.id.clone();
/// app.todo_lists.push(list);
///
/// assert!(app.list(&id).is_some());
/// assert_eq!(app.total_tasks(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Lists in insertion order.
    #[serde(default)]
    pub todo_lists: Vec<TodoList>,
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Application {
    /// Looks up a list by ID.
    #[must_use]
    pub fn list(&self, id: &ListId) -> Option<&TodoList> {
        self.todo_lists.iter().find(|list| &list.id == id)
    }

    /// Looks up a list by ID for modification.
    pub fn list_mut(&mut self, id: &ListId) -> Option<&mut TodoList> {
        self.todo_lists.iter_mut().find(|list| &list.id == id)
    }

    /// Returns the position of a list, if present.
    #[must_use]
    pub fn list_index(&self, id: &ListId) -> Option<usize> {
        self.todo_lists.iter().position(|list| &list.id == id)
    }

    /// Removes a list together with its tasks.
    pub fn remove_list(&mut self, id: &ListId) -> Option<TodoList> {
        let index = self.list_index(id)?;
        Some(self.todo_lists.remove(index))
    }

    /// Number of tasks across all lists.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.todo_lists.iter().map(TodoList::total_count).sum()
    }

    /// Number of completed tasks across all lists.
    #[must_use]
    pub fn completed_tasks(&self) -> usize {
        self.todo_lists.iter().map(TodoList::completed_count).sum()
    }

    /// Overall completion percentage, or `None` when there are no tasks.
    #[must_use]
    pub fn completion_rate(&self) -> Option<f64> {
        let total = self.total_tasks();
        (total > 0).then(|| self.completed_tasks() as f64 / total as f64 * 100.0)
    }
}
