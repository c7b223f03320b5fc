//! SQLite backend.
//!
//! All data lives in one database file. Deleting a list removes its tasks
//! through `ON DELETE CASCADE`, so foreign keys are switched on for every
//! connection.
//!
//! Timestamps are stored as UTC text in the form `YYYY-MM-DD HH:MM:SS.ffffff`,
//! which sorts chronologically.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use lazytodo_model::{Application, ListId, Priority, Settings, Task, TaskDraft, TaskId, TodoList};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::schema;
use crate::snapshot;
use crate::store::{Store, StoreDescriptor, StoreKind};

/// Format used to write timestamp columns.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format accepted when reading timestamp columns; the fraction is optional.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const KEY_REMINDER_MINUTES: &str = "reminder_minutes";
const KEY_SHOW_COMPLETED: &str = "show_completed";
const KEY_AUTO_SAVE: &str = "auto_save";

const LIST_COLUMNS: &str = "id, name, description, created_at, updated_at";
const TASK_COLUMNS: &str =
    "id, list_id, title, description, completed, priority, created_at, updated_at, deadline";

/// What to do when a written row's ID already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnConflict {
    /// Fail with a constraint error.
    Fail,
    /// Overwrite the existing row in place.
    Replace,
}

/// A store backed by a SQLite database.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use lazytodo_store::{SqliteStore, Store};
///
/// # fn main() -> lazytodo_store::Result<()> {
/// let mut store = SqliteStore::open(Path::new("/tmp/lazytodo.db"))?;
/// let app = store.load()?;
/// println!("{} lists", app.todo_lists.len());
/// store.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    conn: Option<Connection>,
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and brings its
    /// schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be opened, or a migration fails.
    #[instrument]
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::io(parent, source))?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn, path.to_path_buf())
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, PathBuf::from(":memory:"))
    }

    fn init(mut conn: Connection, path: PathBuf) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let applied = schema::migrate(&mut conn)?;
        debug!(?path, applied, "database ready");
        Ok(Self {
            conn: Some(conn),
            path,
        })
    }

    /// The database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The highest applied schema migration.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is closed or the query fails.
    pub fn schema_version(&self) -> Result<i64> {
        schema::current_version(self.conn()?)
    }

    pub(crate) fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(StoreError::Closed)
    }

    pub(crate) fn conn_mut(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or(StoreError::Closed)
    }
}

impl Store for SqliteStore {
    fn describe(&self) -> StoreDescriptor {
        StoreDescriptor {
            kind: StoreKind::Database,
            path: self.path.clone(),
        }
    }

    #[instrument(skip(self), fields(path = ?self.path))]
    fn load(&mut self) -> Result<Application> {
        let conn = self.conn()?;

        let mut todo_lists = {
            let mut stmt = conn.prepare(&format!(
                "SELECT {LIST_COLUMNS} FROM todo_lists ORDER BY created_at, rowid"
            ))?;
            let lists = stmt
                .query_map([], list_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            lists
        };

        let mut tasks_by_list: HashMap<ListId, Vec<Task>> = HashMap::new();
        {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at, rowid"
            ))?;
            for row in stmt.query_map([], task_from_row)? {
                let (list_id, task) = row?;
                tasks_by_list.entry(list_id).or_default().push(task);
            }
        }
        for list in &mut todo_lists {
            if let Some(tasks) = tasks_by_list.remove(&list.id) {
                list.tasks = tasks;
            }
        }

        let settings = load_settings(conn)?;
        debug!(lists = todo_lists.len(), "loaded snapshot");
        Ok(Application {
            todo_lists,
            settings,
        })
    }

    #[instrument(skip_all)]
    fn save(&mut self, app: &Application) -> Result<()> {
        let now = snapshot::now();
        let tx = self.conn_mut()?.transaction()?;
        save_settings(&tx, &app.settings, now)?;
        tx.commit()?;
        debug!(settings = ?app.settings, "saved settings");
        Ok(())
    }

    #[instrument(skip(self, app))]
    fn create_list(
        &mut self,
        app: &mut Application,
        name: &str,
        description: &str,
    ) -> Result<ListId> {
        let list = TodoList::with_id(ListId::generate(), name, description, snapshot::now());
        write_list(self.conn()?, &list, OnConflict::Fail)?;

        let id = list.id.clone();
        app.todo_lists.push(list);
        debug!(%id, "created list");
        Ok(id)
    }

    #[instrument(skip(self, app))]
    fn update_list(
        &mut self,
        app: &mut Application,
        id: &ListId,
        name: &str,
        description: &str,
    ) -> Result<()> {
        snapshot::list(app, id)?;
        let now = snapshot::now();
        let changed = self.conn()?.execute(
            "UPDATE todo_lists SET name = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
            params![name, description, format_timestamp(&now), id.as_str()],
        )?;
        if changed == 0 {
            return Err(StoreError::ListNotFound(id.clone()));
        }
        snapshot::rename_list(app, id, name, description, now)
    }

    #[instrument(skip(self, app))]
    fn delete_list(&mut self, app: &mut Application, id: &ListId) -> Result<()> {
        snapshot::list(app, id)?;
        let changed = self
            .conn()?
            .execute("DELETE FROM todo_lists WHERE id = ?1", params![id.as_str()])?;
        if changed == 0 {
            return Err(StoreError::ListNotFound(id.clone()));
        }
        let removed = snapshot::remove_list(app, id)?;
        debug!(%id, tasks = removed.tasks.len(), "deleted list");
        Ok(())
    }

    #[instrument(skip(self, app, draft), fields(title = %draft.title))]
    fn create_task(
        &mut self,
        app: &mut Application,
        list: &ListId,
        draft: TaskDraft,
    ) -> Result<TaskId> {
        snapshot::list(app, list)?;
        let task = Task::with_id(TaskId::generate(), draft, snapshot::now());
        write_task(self.conn()?, list, &task, OnConflict::Fail)?;

        let id = task.id.clone();
        snapshot::push_task(app, list, task)?;
        debug!(%id, "created task");
        Ok(id)
    }

    #[instrument(skip(self, app, draft))]
    fn update_task(
        &mut self,
        app: &mut Application,
        list: &ListId,
        task: &TaskId,
        draft: TaskDraft,
    ) -> Result<()> {
        snapshot::task(app, list, task)?;
        let now = snapshot::now();
        let changed = self.conn()?.execute(
            "UPDATE tasks
             SET title = ?1, description = ?2, priority = ?3, deadline = ?4, updated_at = ?5
             WHERE id = ?6 AND list_id = ?7",
            params![
                draft.title,
                draft.description,
                i64::from(draft.priority),
                draft.deadline.as_ref().map(format_timestamp),
                format_timestamp(&now),
                task.as_str(),
                list.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(snapshot::task_not_found(list, task));
        }
        snapshot::edit_task(app, list, task, draft, now)
    }

    #[instrument(skip(self, app))]
    fn toggle_task(&mut self, app: &mut Application, list: &ListId, task: &TaskId) -> Result<bool> {
        let completed = !snapshot::task(app, list, task)?.completed;
        let now = snapshot::now();
        let changed = self.conn()?.execute(
            "UPDATE tasks SET completed = ?1, updated_at = ?2 WHERE id = ?3 AND list_id = ?4",
            params![completed, format_timestamp(&now), task.as_str(), list.as_str()],
        )?;
        if changed == 0 {
            return Err(snapshot::task_not_found(list, task));
        }
        snapshot::toggle_task(app, list, task, now)
    }

    #[instrument(skip(self, app))]
    fn delete_task(&mut self, app: &mut Application, list: &ListId, task: &TaskId) -> Result<()> {
        snapshot::task(app, list, task)?;
        let changed = self.conn()?.execute(
            "DELETE FROM tasks WHERE id = ?1 AND list_id = ?2",
            params![task.as_str(), list.as_str()],
        )?;
        if changed == 0 {
            return Err(snapshot::task_not_found(list, task));
        }
        snapshot::remove_task(app, list, task)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let conn = self.conn.take().ok_or(StoreError::Closed)?;
        conn.close().map_err(|(_, err)| StoreError::Database(err))?;
        info!(path = ?self.path, "database closed");
        Ok(())
    }
}

/// Inserts or overwrites a list row.
pub(crate) fn write_list(
    conn: &Connection,
    list: &TodoList,
    on_conflict: OnConflict,
) -> rusqlite::Result<()> {
    let sql = match on_conflict {
        OnConflict::Fail => {
            "INSERT INTO todo_lists (id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)"
        }
        OnConflict::Replace => {
            "INSERT INTO todo_lists (id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at"
        }
    };
    conn.execute(
        sql,
        params![
            list.id.as_str(),
            list.name,
            list.description,
            format_timestamp(&list.created_at),
            format_timestamp(&list.updated_at),
        ],
    )?;
    Ok(())
}

/// Inserts or overwrites a task row belonging to `list_id`.
pub(crate) fn write_task(
    conn: &Connection,
    list_id: &ListId,
    task: &Task,
    on_conflict: OnConflict,
) -> rusqlite::Result<()> {
    let sql = match on_conflict {
        OnConflict::Fail => {
            "INSERT INTO tasks (id, list_id, title, description, completed, priority,
                                created_at, updated_at, deadline)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        }
        OnConflict::Replace => {
            "INSERT INTO tasks (id, list_id, title, description, completed, priority,
                                created_at, updated_at, deadline)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                list_id = excluded.list_id,
                title = excluded.title,
                description = excluded.description,
                completed = excluded.completed,
                priority = excluded.priority,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at,
                deadline = excluded.deadline"
        }
    };
    conn.execute(
        sql,
        params![
            task.id.as_str(),
            list_id.as_str(),
            task.title,
            task.description,
            task.completed,
            i64::from(task.priority),
            format_timestamp(&task.created_at),
            format_timestamp(&task.updated_at),
            task.deadline.as_ref().map(format_timestamp),
        ],
    )?;
    Ok(())
}

/// Writes every setting row.
pub(crate) fn save_settings(
    conn: &Connection,
    settings: &Settings,
    now: DateTime<Utc>,
) -> rusqlite::Result<()> {
    let updated_at = format_timestamp(&now);
    let rows = [
        (KEY_REMINDER_MINUTES, settings.reminder_minutes.to_string()),
        (KEY_SHOW_COMPLETED, settings.show_completed.to_string()),
        (KEY_AUTO_SAVE, settings.auto_save.to_string()),
    ];
    for (key, value) in rows {
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, updated_at],
        )?;
    }
    Ok(())
}

fn load_settings(conn: &Connection) -> Result<Settings> {
    let mut settings = Settings::default();
    let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    for row in rows {
        let (key, value) = row?;
        let applied = match key.as_str() {
            KEY_REMINDER_MINUTES => value
                .parse()
                .map(|minutes| settings.reminder_minutes = minutes)
                .is_ok(),
            KEY_SHOW_COMPLETED => parse_flag(&value)
                .map(|flag| settings.show_completed = flag)
                .is_some(),
            KEY_AUTO_SAVE => parse_flag(&value)
                .map(|flag| settings.auto_save = flag)
                .is_some(),
            _ => {
                debug!(%key, "ignoring unknown setting");
                true
            }
        };
        if !applied {
            warn!(%key, %value, "ignoring malformed setting");
        }
    }
    Ok(settings.normalized())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp, also accepting RFC 3339 text.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_PARSE_FORMAT)
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

fn invalid_column(index: usize, kind: Type, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, kind, message.into())
}

fn timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(index)?;
    parse_timestamp(&text)
        .ok_or_else(|| invalid_column(index, Type::Text, format!("invalid timestamp {text:?}")))
}

fn optional_timestamp_column(
    row: &Row<'_>,
    index: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    row.get::<_, Option<String>>(index)?
        .map(|text| {
            parse_timestamp(&text).ok_or_else(|| {
                invalid_column(index, Type::Text, format!("invalid timestamp {text:?}"))
            })
        })
        .transpose()
}

fn list_from_row(row: &Row<'_>) -> rusqlite::Result<TodoList> {
    Ok(TodoList {
        id: ListId::from(row.get::<_, String>(0)?),
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        tasks: Vec::new(),
        created_at: timestamp_column(row, 3)?,
        updated_at: timestamp_column(row, 4)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<(ListId, Task)> {
    let raw_priority: i64 = row.get(5)?;
    let priority = Priority::try_from(raw_priority)
        .map_err(|err| invalid_column(5, Type::Integer, err.to_string()))?;

    let task = Task {
        id: TaskId::from(row.get::<_, String>(0)?),
        title: row.get(2)?,
        description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        completed: row.get(4)?,
        priority,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
        deadline: optional_timestamp_column(row, 8)?,
    };
    Ok((ListId::from(row.get::<_, String>(1)?), task))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use tempfile::TempDir;

    use super::*;

    fn store() -> (SqliteStore, Application) {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let app = store.load().unwrap();
        (store, app)
    }

    fn task_count(store: &SqliteStore) -> i64 {
        store
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn fresh_database_has_default_settings_and_no_lists() {
        let (store, app) = store();
        assert!(app.todo_lists.is_empty());
        assert_eq!(app.settings, Settings::default());
        assert_eq!(store.schema_version().unwrap(), schema::latest_version());
    }

    #[test]
    fn created_data_round_trips_in_order() {
        let (mut store, mut app) = store();
        let work = store.create_list(&mut app, "Work", "Office stuff").unwrap();
        let home = store.create_list(&mut app, "Home", "").unwrap();

        let deadline = Utc.with_ymd_and_hms(2024, 12, 25, 9, 0, 0).unwrap();
        store
            .create_task(
                &mut app,
                &work,
                TaskDraft::new("Report")
                    .priority(Priority::Critical)
                    .deadline(deadline),
            )
            .unwrap();
        store
            .create_task(&mut app, &work, TaskDraft::new("Email"))
            .unwrap();
        store
            .create_task(&mut app, &home, TaskDraft::new("Dishes"))
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, app);
        assert_eq!(loaded.todo_lists[0].name, "Work");
        assert_eq!(loaded.todo_lists[0].tasks[0].title, "Report");
        assert_eq!(loaded.todo_lists[0].tasks[0].priority, Priority::Critical);
        assert_eq!(loaded.todo_lists[0].tasks[0].deadline, Some(deadline));
        assert_eq!(loaded.todo_lists[0].tasks[1].title, "Email");
    }

    #[test]
    fn deleting_a_list_cascades_to_its_tasks() {
        let (mut store, mut app) = store();
        let list = store.create_list(&mut app, "Doomed", "").unwrap();
        store
            .create_task(&mut app, &list, TaskDraft::new("a"))
            .unwrap();
        store
            .create_task(&mut app, &list, TaskDraft::new("b"))
            .unwrap();
        assert_eq!(task_count(&store), 2);

        store.delete_list(&mut app, &list).unwrap();
        assert_eq!(task_count(&store), 0);
        assert!(app.todo_lists.is_empty());
        assert!(store.load().unwrap().todo_lists.is_empty());
    }

    #[test]
    fn toggle_twice_is_identity() {
        let (mut store, mut app) = store();
        let list = store.create_list(&mut app, "L", "").unwrap();
        let task = store
            .create_task(&mut app, &list, TaskDraft::new("t"))
            .unwrap();

        assert!(store.toggle_task(&mut app, &list, &task).unwrap());
        assert!(store.load().unwrap().todo_lists[0].tasks[0].completed);
        assert!(!store.toggle_task(&mut app, &list, &task).unwrap());
        assert!(!store.load().unwrap().todo_lists[0].tasks[0].completed);
    }

    #[test]
    fn update_task_keeps_identity_and_completion() {
        let (mut store, mut app) = store();
        let list = store.create_list(&mut app, "L", "").unwrap();
        let task = store
            .create_task(&mut app, &list, TaskDraft::new("old"))
            .unwrap();
        store.toggle_task(&mut app, &list, &task).unwrap();

        store
            .update_task(
                &mut app,
                &list,
                &task,
                TaskDraft::new("new").description("details"),
            )
            .unwrap();

        let loaded = store.load().unwrap();
        let stored = &loaded.todo_lists[0].tasks[0];
        assert_eq!(stored.id, task);
        assert_eq!(stored.title, "new");
        assert_eq!(stored.description, "details");
        assert!(stored.completed);
        assert_eq!(loaded, app);
    }

    #[test]
    fn unknown_ids_leave_snapshot_untouched() {
        let (mut store, mut app) = store();
        let list = store.create_list(&mut app, "L", "").unwrap();
        let before = app.clone();
        let missing_list = ListId::from("nope");
        let missing_task = TaskId::from("nope");

        let err = store
            .create_task(&mut app, &missing_list, TaskDraft::new("x"))
            .unwrap_err();
        assert!(matches!(err, StoreError::ListNotFound(_)));
        let err = store
            .toggle_task(&mut app, &list, &missing_task)
            .unwrap_err();
        assert!(matches!(err, StoreError::TaskNotFound { .. }));
        let err = store.delete_list(&mut app, &missing_list).unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(app, before);
    }

    #[test]
    fn update_list_renames() {
        let (mut store, mut app) = store();
        let list = store.create_list(&mut app, "Old", "").unwrap();
        store
            .update_list(&mut app, &list, "New", "desc")
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.todo_lists[0].name, "New");
        assert_eq!(loaded.todo_lists[0].description, "desc");
    }

    #[test]
    fn settings_are_saved() {
        let (mut store, mut app) = store();
        app.settings.reminder_minutes = 15;
        app.settings.show_completed = false;
        store.save(&app).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.settings.reminder_minutes, 15);
        assert!(!loaded.settings.show_completed);
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        let (mut store, _) = store();
        store
            .conn()
            .unwrap()
            .execute(
                "UPDATE settings SET value = 'soon' WHERE key = ?1",
                params![KEY_REMINDER_MINUTES],
            )
            .unwrap();
        assert_eq!(store.load().unwrap().settings.reminder_minutes, 60);
    }

    #[test]
    fn closed_store_rejects_operations() {
        let (mut store, mut app) = store();
        store.close().unwrap();

        assert!(matches!(store.load(), Err(StoreError::Closed)));
        assert!(matches!(
            store.create_list(&mut app, "x", ""),
            Err(StoreError::Closed)
        ));
        assert!(matches!(store.close(), Err(StoreError::Closed)));
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("lazytodo.db");

        let mut store = SqliteStore::open(&path).unwrap();
        let mut app = store.load().unwrap();
        let list = store.create_list(&mut app, "Persisted", "").unwrap();
        store
            .create_task(&mut app, &list, TaskDraft::new("still here"))
            .unwrap();
        store.close().unwrap();

        let mut reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), app);
        assert_eq!(
            reopened.describe().to_string(),
            format!("Database: {}", path.display())
        );
    }

    #[test]
    fn timestamps_sort_as_text() {
        let early = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 10, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&early), "2024-01-02 03:04:05.000000");
        assert!(format_timestamp(&early) < format_timestamp(&late));
        assert_eq!(parse_timestamp("2024-01-02 03:04:05"), Some(early));
        assert_eq!(parse_timestamp("2024-01-02T03:04:05Z"), Some(early));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        CreateList(String),
        CreateTask(Index, String),
        Toggle(Index, Index),
        DeleteTask(Index, Index),
        DeleteList(Index),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(Op::CreateList),
            (any::<Index>(), "[a-z]{1,8}").prop_map(|(l, t)| Op::CreateTask(l, t)),
            (any::<Index>(), any::<Index>()).prop_map(|(l, t)| Op::Toggle(l, t)),
            (any::<Index>(), any::<Index>()).prop_map(|(l, t)| Op::DeleteTask(l, t)),
            any::<Index>().prop_map(Op::DeleteList),
        ]
    }

    fn pick(app: &Application, list: &Index, task: &Index) -> Option<(ListId, TaskId)> {
        if app.todo_lists.is_empty() {
            return None;
        }
        let list = &app.todo_lists[list.index(app.todo_lists.len())];
        if list.tasks.is_empty() {
            return None;
        }
        let task = &list.tasks[task.index(list.tasks.len())];
        Some((list.id.clone(), task.id.clone()))
    }

    proptest! {
        #[test]
        fn snapshot_always_matches_database(ops in prop::collection::vec(op(), 0..30)) {
            let (mut store, mut app) = store();
            for op in ops {
                match op {
                    Op::CreateList(name) => {
                        store.create_list(&mut app, &name, "").unwrap();
                    }
                    Op::CreateTask(list, title) if !app.todo_lists.is_empty() => {
                        let id = app.todo_lists[list.index(app.todo_lists.len())].id.clone();
                        store.create_task(&mut app, &id, TaskDraft::new(title)).unwrap();
                    }
                    Op::Toggle(list, task) => {
                        if let Some((l, t)) = pick(&app, &list, &task) {
                            store.toggle_task(&mut app, &l, &t).unwrap();
                        }
                    }
                    Op::DeleteTask(list, task) => {
                        if let Some((l, t)) = pick(&app, &list, &task) {
                            store.delete_task(&mut app, &l, &t).unwrap();
                        }
                    }
                    Op::DeleteList(list) if !app.todo_lists.is_empty() => {
                        let id = app.todo_lists[list.index(app.todo_lists.len())].id.clone();
                        store.delete_list(&mut app, &id).unwrap();
                    }
                    _ => {}
                }
            }
            prop_assert_eq!(store.load().unwrap(), app);
        }
    }
}
