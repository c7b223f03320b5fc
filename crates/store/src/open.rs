//! Constructing the configured store.

use std::fs;

use lazytodo_config::{Backend, StorageConfig};
use tracing::{info, instrument};

use crate::error::{Result, StoreError};
use crate::json::JsonStore;
use crate::legacy::import_legacy;
use crate::sqlite::SqliteStore;
use crate::store::Store;

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "lazytodo.db";

/// JSON data file name inside the data directory. Also the file the SQLite
/// backend imports from.
pub const JSON_FILE: &str = "lazytodo.json";

/// Opens the backend selected by `config`, creating the data directory.
///
/// For the SQLite backend, a `lazytodo.json` left in the data directory is
/// imported before the store is returned.
///
/// # Errors
///
/// Returns an error if the data directory cannot be resolved or created, or
/// the backend fails to open.
///
/// # Examples
///
/// ```no_run
/// use lazytodo_config::StorageConfig;
/// use lazytodo_store::open_store;
///
/// # fn main() -> lazytodo_store::Result<()> {
/// let store = open_store(&StorageConfig::default())?;
/// println!("{}", store.describe());
/// # Ok(())
/// # }
/// ```
#[instrument]
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn Store>> {
    let data_dir = config.resolve_data_dir()?;
    fs::create_dir_all(&data_dir).map_err(|source| StoreError::io(&data_dir, source))?;

    match config.backend {
        Backend::Sqlite => {
            let mut store = SqliteStore::open(&data_dir.join(DATABASE_FILE))?;
            if let Some(report) = import_legacy(&mut store, &data_dir.join(JSON_FILE))? {
                info!(
                    lists = report.lists,
                    tasks = report.tasks,
                    "migrated JSON data into the database"
                );
            }
            Ok(Box::new(store))
        }
        Backend::Json => Ok(Box::new(JsonStore::open(data_dir.join(JSON_FILE))?)),
    }
}

#[cfg(test)]
mod tests {
    use lazytodo_model::TaskDraft;
    use tempfile::TempDir;

    use super::*;
    use crate::store::StoreKind;

    fn config(dir: &TempDir, backend: Backend) -> StorageConfig {
        StorageConfig {
            backend,
            data_dir: Some(dir.path().join("data")),
        }
    }

    #[test]
    fn opens_each_backend_in_the_data_dir() {
        let dir = TempDir::new().unwrap();

        let sqlite = open_store(&config(&dir, Backend::Sqlite)).unwrap();
        assert_eq!(sqlite.describe().kind, StoreKind::Database);
        assert_eq!(sqlite.describe().path, dir.path().join("data").join(DATABASE_FILE));

        let json = open_store(&config(&dir, Backend::Json)).unwrap();
        assert_eq!(json.describe().kind, StoreKind::JsonFile);
        assert_eq!(json.describe().path, dir.path().join("data").join(JSON_FILE));
    }

    #[test]
    fn switching_to_sqlite_imports_json_data() {
        let dir = TempDir::new().unwrap();

        let mut json = open_store(&config(&dir, Backend::Json)).unwrap();
        let mut app = json.load().unwrap();
        let list = json.create_list(&mut app, "Carried over", "").unwrap();
        json.create_task(&mut app, &list, TaskDraft::new("me too"))
            .unwrap();
        json.close().unwrap();

        let mut sqlite = open_store(&config(&dir, Backend::Sqlite)).unwrap();
        let loaded = sqlite.load().unwrap();
        assert_eq!(loaded.todo_lists[0].name, "Carried over");
        assert_eq!(loaded.total_tasks(), 1);
        assert!(!dir.path().join("data").join(JSON_FILE).exists());
    }
}
