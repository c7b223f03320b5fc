//! One-time import of data written by the JSON-only releases.
//!
//! Older releases kept everything in `<data_dir>/lazytodo.json`. When the
//! SQLite backend finds that file it copies the contents into the database
//! and moves the file aside as `lazytodo.json.backup.YYYYMMDD-HHMMSS`, so the
//! import runs once.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::json::read_snapshot;
use crate::snapshot;
use crate::sqlite::{OnConflict, SqliteStore, save_settings, write_list, write_task};

/// Summary of a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of lists imported.
    pub lists: usize,
    /// Number of tasks imported.
    pub tasks: usize,
    /// Where the legacy file was moved, or `None` if moving it failed.
    pub backup_path: Option<PathBuf>,
}

/// Imports `legacy_path` into `store` if the file exists.
///
/// Rows are upserted inside one transaction, so re-importing the same file
/// is harmless. Failing to move the file aside afterwards is only logged.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the database
/// write fails. In that case nothing is imported and the file stays put.
#[instrument(skip(store))]
pub fn import_legacy(store: &mut SqliteStore, legacy_path: &Path) -> Result<Option<ImportReport>> {
    let Some(app) = read_snapshot(legacy_path)? else {
        return Ok(None);
    };
    info!(lists = app.todo_lists.len(), "importing legacy data file");

    let tx = store.conn_mut()?.transaction()?;
    for list in &app.todo_lists {
        write_list(&tx, list, OnConflict::Replace)?;
        for task in &list.tasks {
            write_task(&tx, &list.id, task, OnConflict::Replace)?;
        }
    }
    save_settings(&tx, &app.settings, snapshot::now())?;
    tx.commit()?;

    let backup = backup_path_for(legacy_path, Local::now().naive_local());
    let backup_path = match fs::rename(legacy_path, &backup) {
        Ok(()) => Some(backup),
        Err(err) => {
            warn!(?backup, error = %err, "imported legacy data but could not move the file aside");
            None
        }
    };

    let report = ImportReport {
        lists: app.todo_lists.len(),
        tasks: app.total_tasks(),
        backup_path,
    };
    info!(?report, "legacy import finished");
    Ok(Some(report))
}

/// Returns the name a legacy file is moved to when imported at `at`.
fn backup_path_for(path: &Path, at: NaiveDateTime) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".backup.{}", at.format("%Y%m%d-%H%M%S")));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lazytodo_model::{Application, Priority, Task, TaskDraft, TodoList};
    use tempfile::TempDir;

    use super::*;
    use crate::store::Store;

    fn legacy_app() -> Application {
        let mut app = Application::default();
        let mut work = TodoList::new("Work", "from the old days");
        work.tasks
            .push(Task::new(TaskDraft::new("Report").priority(Priority::High)));
        let mut done = Task::new(TaskDraft::new("Email"));
        done.completed = true;
        work.tasks.push(done);
        app.todo_lists.push(work);
        app.todo_lists.push(TodoList::new("Home", ""));
        app.settings.reminder_minutes = 30;
        app
    }

    #[test]
    fn backup_name_carries_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        assert_eq!(
            backup_path_for(Path::new("/data/lazytodo.json"), at),
            PathBuf::from("/data/lazytodo.json.backup.20240309-140507")
        );
    }

    #[test]
    fn missing_file_is_not_an_import() {
        let dir = TempDir::new().unwrap();
        let mut store = SqliteStore::open_in_memory().unwrap();
        let report = import_legacy(&mut store, &dir.path().join("lazytodo.json")).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn imports_everything_and_moves_file_aside() {
        let dir = TempDir::new().unwrap();
        let legacy = dir.path().join("lazytodo.json");
        fs::write(&legacy, serde_json::to_string(&legacy_app()).unwrap()).unwrap();

        let mut store = SqliteStore::open(&dir.path().join("lazytodo.db")).unwrap();
        let report = import_legacy(&mut store, &legacy).unwrap().unwrap();

        assert_eq!(report.lists, 2);
        assert_eq!(report.tasks, 2);
        assert!(!legacy.exists());
        let backup = report.backup_path.unwrap();
        assert!(backup.exists());
        assert!(
            backup
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("lazytodo.json.backup.")
        );

        let loaded = store.load().unwrap();
        assert_eq!(loaded.todo_lists.len(), 2);
        assert_eq!(loaded.todo_lists[0].name, "Work");
        assert_eq!(loaded.todo_lists[0].tasks[0].priority, Priority::High);
        assert!(loaded.todo_lists[0].tasks[1].completed);
        assert_eq!(loaded.settings.reminder_minutes, 30);
    }

    #[test]
    fn reimport_does_not_duplicate() {
        let dir = TempDir::new().unwrap();
        let legacy = dir.path().join("lazytodo.json");
        let content = serde_json::to_string(&legacy_app()).unwrap();
        let mut store = SqliteStore::open_in_memory().unwrap();

        fs::write(&legacy, &content).unwrap();
        import_legacy(&mut store, &legacy).unwrap();
        fs::write(&legacy, &content).unwrap();
        import_legacy(&mut store, &legacy).unwrap();

        assert_eq!(store.load().unwrap().total_tasks(), 2);
    }

    #[test]
    fn corrupt_file_is_left_in_place() {
        let dir = TempDir::new().unwrap();
        let legacy = dir.path().join("lazytodo.json");
        fs::write(&legacy, "[").unwrap();

        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(import_legacy(&mut store, &legacy).is_err());
        assert!(legacy.exists());
    }
}
