//! JSON file backend.
//!
//! The whole snapshot is kept in one pretty-printed document:
//!
//! ```text
//! <data_dir>/
//! ├── lazytodo.json          # current snapshot
//! └── lazytodo.json.backup   # the version before the last write
//! ```
//!
//! Every mutation is applied to a copy of the caller's snapshot, the copy is
//! written out, and only then does it replace the caller's snapshot. An
//! explicit save of a snapshot identical to the last one written is a no-op,
//! so the backup keeps the version before the last real change.

use std::fs;
use std::path::{Path, PathBuf};

use lazytodo_model::{Application, ListId, Task, TaskDraft, TaskId, TodoList};
use tracing::{debug, instrument, warn};

use crate::error::{Result, StoreError};
use crate::snapshot;
use crate::store::{Store, StoreDescriptor, StoreKind};

/// Suffix of the copy kept before each write.
const BACKUP_SUFFIX: &str = "backup";

/// Suffix of the scratch file a write goes through.
const TEMP_SUFFIX: &str = "tmp";

/// A store that keeps everything in a single JSON file.
///
/// # Examples
///
/// ```no_run
/// use lazytodo_store::{JsonStore, Store};
///
/// # fn main() -> lazytodo_store::Result<()> {
/// let mut store = JsonStore::open("/tmp/lazytodo.json")?;
/// let mut app = store.load()?;
/// store.create_list(&mut app, "Inbox", "")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    closed: bool,
    /// What the data file holds, as far as this store knows.
    last_written: Option<Application>,
}

impl JsonStore {
    /// Opens the store at `path`, creating the parent directory if needed.
    /// The file itself is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::io(parent, source))?;
        }
        debug!(?path, "opened JSON store");
        Ok(Self {
            path,
            closed: false,
            last_written: None,
        })
    }

    /// The data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file the previous version is copied to before each write.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, BACKUP_SUFFIX)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }

    #[instrument(skip_all, fields(path = ?self.path))]
    fn write(&mut self, app: &Application) -> Result<()> {
        let content = serde_json::to_string_pretty(app).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if self.path.exists() {
            let backup = self.backup_path();
            if let Err(err) = fs::copy(&self.path, &backup) {
                warn!(?backup, error = %err, "failed to back up data file");
            }
        }

        let temp = sibling(&self.path, TEMP_SUFFIX);
        fs::write(&temp, content).map_err(|source| StoreError::io(&temp, source))?;
        fs::rename(&temp, &self.path).map_err(|source| StoreError::io(&self.path, source))?;
        debug!(lists = app.todo_lists.len(), "wrote data file");
        self.last_written = Some(app.clone());
        Ok(())
    }

    /// Applies `change` to a copy of `app`, persists the copy and then
    /// swaps it in.
    fn commit<T>(
        &mut self,
        app: &mut Application,
        change: impl FnOnce(&mut Application) -> Result<T>,
    ) -> Result<T> {
        self.ensure_open()?;
        let mut next = app.clone();
        let out = change(&mut next)?;
        self.write(&next)?;
        *app = next;
        Ok(out)
    }
}

/// Returns `path` with `.suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Reads a snapshot from `path`, returning `None` if the file does not exist.
pub(crate) fn read_snapshot(path: &Path) -> Result<Option<Application>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::io(path, source)),
    };
    let mut app: Application =
        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    app.settings = app.settings.normalized();
    Ok(Some(app))
}

impl Store for JsonStore {
    fn describe(&self) -> StoreDescriptor {
        StoreDescriptor {
            kind: StoreKind::JsonFile,
            path: self.path.clone(),
        }
    }

    #[instrument(skip(self), fields(path = ?self.path))]
    fn load(&mut self) -> Result<Application> {
        self.ensure_open()?;
        let app = read_snapshot(&self.path)?.unwrap_or_else(|| {
            debug!("no data file yet, starting empty");
            Application::default()
        });
        self.last_written = self.path.exists().then(|| app.clone());
        Ok(app)
    }

    fn save(&mut self, app: &Application) -> Result<()> {
        self.ensure_open()?;
        if self.last_written.as_ref() == Some(app) {
            debug!("snapshot unchanged since the last write");
            return Ok(());
        }
        self.write(app)
    }

    fn create_list(
        &mut self,
        app: &mut Application,
        name: &str,
        description: &str,
    ) -> Result<ListId> {
        self.commit(app, |next| {
            let list = TodoList::with_id(ListId::generate(), name, description, snapshot::now());
            let id = list.id.clone();
            next.todo_lists.push(list);
            Ok(id)
        })
    }

    fn update_list(
        &mut self,
        app: &mut Application,
        id: &ListId,
        name: &str,
        description: &str,
    ) -> Result<()> {
        self.commit(app, |next| {
            snapshot::rename_list(next, id, name, description, snapshot::now())
        })
    }

    fn delete_list(&mut self, app: &mut Application, id: &ListId) -> Result<()> {
        self.commit(app, |next| snapshot::remove_list(next, id).map(drop))
    }

    fn create_task(
        &mut self,
        app: &mut Application,
        list: &ListId,
        draft: TaskDraft,
    ) -> Result<TaskId> {
        self.commit(app, |next| {
            let task = Task::with_id(TaskId::generate(), draft, snapshot::now());
            let id = task.id.clone();
            snapshot::push_task(next, list, task)?;
            Ok(id)
        })
    }

    fn update_task(
        &mut self,
        app: &mut Application,
        list: &ListId,
        task: &TaskId,
        draft: TaskDraft,
    ) -> Result<()> {
        self.commit(app, |next| {
            snapshot::edit_task(next, list, task, draft, snapshot::now())
        })
    }

    fn toggle_task(&mut self, app: &mut Application, list: &ListId, task: &TaskId) -> Result<bool> {
        self.commit(app, |next| {
            snapshot::toggle_task(next, list, task, snapshot::now())
        })
    }

    fn delete_task(&mut self, app: &mut Application, list: &ListId, task: &TaskId) -> Result<()> {
        self.commit(app, |next| snapshot::remove_task(next, list, task).map(drop))
    }

    fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }
}
