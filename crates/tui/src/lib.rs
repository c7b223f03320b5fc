//! Terminal UI for lazytodo.
//!
//! A Ratatui interface over a [`Store`](lazytodo_store::Store): a sidebar of
//! todo lists, a main panel with the tasks of the current list or the
//! settings, a status bar, and form and help overlays.
//!
//! # Overview
//!
//! - [`app`]: the controller and run loop
//! - [`state`]: view state and selections over the loaded snapshot
//! - [`layout`]: panel geometry, focus and drawing
//! - [`event`]: terminal events, tickers and key bindings
//! - [`form`]: create/edit form buffers
//! - [`settings_state`]: settings selection and adjustment
//! - [`status`]: transient status messages
//! - [`reminder`]: deadline reminder scans
//! - [`terminal`]: terminal setup, teardown and panic handling
//! - [`widgets`]: panel content builders
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use lazytodo_store::SqliteStore;
//! use lazytodo_tui::{App, EventSource, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let store = SqliteStore::open(Path::new("todo.db"))?;
//!     let mut app = App::load(Box::new(store))?;
//!
//!     let mut terminal = terminal::setup_terminal()?;
//!     let result = app.run(&mut terminal, &mut EventSource::spawn()).await;
//!     terminal::restore_terminal(&mut terminal)?;
//!     app.close()?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod form;
pub mod layout;
pub mod reminder;
pub mod settings_state;
pub mod state;
pub mod status;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::App;
pub use event::{AppEvent, EventSource};
pub use layout::{LayoutManager, PanelId};
pub use state::{AppState, ViewState};
