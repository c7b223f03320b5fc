//! Snapshot mutations shared by the backends.
//!
//! Each helper applies one change to an [`Application`] and reports unknown
//! IDs the same way regardless of backend.

use chrono::{DateTime, SubsecRound, Utc};
use lazytodo_model::{Application, ListId, Task, TaskDraft, TaskId, TodoList};

use crate::error::{Result, StoreError};

/// The current time at the precision the SQLite text columns keep.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn list<'a>(app: &'a Application, id: &ListId) -> Result<&'a TodoList> {
    app.list(id)
        .ok_or_else(|| StoreError::ListNotFound(id.clone()))
}

pub(crate) fn list_mut<'a>(app: &'a mut Application, id: &ListId) -> Result<&'a mut TodoList> {
    app.list_mut(id)
        .ok_or_else(|| StoreError::ListNotFound(id.clone()))
}

pub(crate) fn task<'a>(app: &'a Application, list_id: &ListId, id: &TaskId) -> Result<&'a Task> {
    list(app, list_id)?
        .task(id)
        .ok_or_else(|| task_not_found(list_id, id))
}

pub(crate) fn task_mut<'a>(
    app: &'a mut Application,
    list_id: &ListId,
    id: &TaskId,
) -> Result<&'a mut Task> {
    list_mut(app, list_id)?
        .task_mut(id)
        .ok_or_else(|| task_not_found(list_id, id))
}

pub(crate) fn task_not_found(list: &ListId, task: &TaskId) -> StoreError {
    StoreError::TaskNotFound {
        list: list.clone(),
        task: task.clone(),
    }
}

pub(crate) fn rename_list(
    app: &mut Application,
    id: &ListId,
    name: &str,
    description: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let list = list_mut(app, id)?;
    list.name = name.to_string();
    list.description = description.to_string();
    list.updated_at = now;
    Ok(())
}

pub(crate) fn remove_list(app: &mut Application, id: &ListId) -> Result<TodoList> {
    app.remove_list(id)
        .ok_or_else(|| StoreError::ListNotFound(id.clone()))
}

pub(crate) fn push_task(app: &mut Application, list_id: &ListId, task: Task) -> Result<()> {
    list_mut(app, list_id)?.tasks.push(task);
    Ok(())
}

pub(crate) fn edit_task(
    app: &mut Application,
    list_id: &ListId,
    id: &TaskId,
    draft: TaskDraft,
    now: DateTime<Utc>,
) -> Result<()> {
    task_mut(app, list_id, id)?.apply(draft, now);
    Ok(())
}

pub(crate) fn toggle_task(
    app: &mut Application,
    list_id: &ListId,
    id: &TaskId,
    now: DateTime<Utc>,
) -> Result<bool> {
    Ok(task_mut(app, list_id, id)?.toggle(now))
}

pub(crate) fn remove_task(app: &mut Application, list_id: &ListId, id: &TaskId) -> Result<Task> {
    list_mut(app, list_id)?
        .remove_task(id)
        .ok_or_else(|| task_not_found(list_id, id))
}
