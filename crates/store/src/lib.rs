//! Persistence for lazytodo.
//!
//! Every backend implements the [`Store`] trait. A store owns the durable
//! copy of the data; the caller owns an in-memory [`Application`] snapshot
//! that each mutating operation updates only after the durable write has
//! succeeded, so the two never drift apart.
//!
//! # Backends
//!
//! - [`SqliteStore`]: the default, a single `lazytodo.db` file with schema
//!   migrations and cascading deletes
//! - [`JsonStore`]: the whole snapshot in `lazytodo.json`, rewritten on
//!   every change with the previous version kept as a backup
//!
//! When the SQLite backend is opened next to a `lazytodo.json` from an older
//! install, its contents are imported once (see [`import_legacy`]).
//!
//! # Examples
//!
//! ```
//! use lazytodo_model::{Application, TaskDraft};
//! use lazytodo_store::{SqliteStore, Store};
//!
//! # fn main() -> lazytodo_store::Result<()> {
//! let mut store = SqliteStore::open_in_memory()?;
//! let mut app = store.load()?;
//!
//! let list = store.create_list(&mut app, "Groceries", "")?;
//! store.create_task(&mut app, &list, TaskDraft::new("Milk"))?;
//!
//! assert_eq!(store.load()?, app);
//! # Ok(())
//! # }
//! ```
//!
//! [`Application`]: lazytodo_model::Application

pub mod error;
pub mod json;
pub mod legacy;
pub mod open;
mod schema;
mod snapshot;
pub mod sqlite;
pub mod store;

pub use error::{Result, StoreError};
pub use json::JsonStore;
pub use legacy::{ImportReport, import_legacy};
pub use open::{DATABASE_FILE, JSON_FILE, open_store};
pub use sqlite::SqliteStore;
pub use store::{Store, StoreDescriptor, StoreKind};
