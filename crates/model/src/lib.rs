//! Domain types for the lazytodo application.
//!
//! This crate defines the entities every other lazytodo component works
//! with: lists, tasks, settings and the application snapshot that holds
//! them, plus deadline handling and the controller's message type. It
//! performs no I/O.
//!
//! # Overview
//!
//! - [`id`]: list and task identifiers with a monotonic generator
//! - [`task`]: priorities, tasks and task drafts
//! - [`list`]: todo lists and their progress
//! - [`settings`]: user-adjustable settings
//! - [`application`]: the persisted snapshot
//! - [`deadline`]: `YYYY-MM-DD HH:MM` parsing and display
//! - [`message`]: TUI event messages
//! - [`error`]: error types
//!
//! # Examples
//!
//! ```
//! use lazytodo_model::{Application, Priority, Task, TaskDraft, TodoList};
//!
//! let mut app = Application::default();
//!
//! let mut list = TodoList::new("Home", "Chores");
//! list.tasks.push(Task::new(TaskDraft::new("Water plants").priority(Priority::High)));
//! app.todo_lists.push(list);
//!
//! assert_eq!(app.total_tasks(), 1);
//! assert_eq!(app.todo_lists[0].progress(), 0.0);
//! ```

pub mod application;
pub mod deadline;
pub mod error;
pub mod id;
pub mod list;
pub mod message;
pub mod settings;
pub mod task;

// Re-export primary types at crate root for convenience
pub use application::Application;
pub use error::{ModelError, Result};
pub use id::{ListId, TaskId};
pub use list::TodoList;
pub use message::Message;
pub use settings::Settings;
pub use task::{Priority, Task, TaskDraft};
