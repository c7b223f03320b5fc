//! Controller state: the current view, the loaded snapshot and selections.
//!
//! The sidebar and task list shown on screen are projections of the
//! snapshot, recomputed on demand. Only indices into those projections are
//! stored, and [`AppState::clamp_selection`] pulls them back in range after
//! every mutation.

use lazytodo_model::{Application, ListId, Task, TodoList};

use crate::event::InputMode;

/// The controller's states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Browsing lists.
    #[default]
    ListsView,
    /// Browsing the tasks of the current list.
    TasksView,
    /// Form overlay for a new list.
    CreateListView,
    /// Form overlay editing a list.
    EditListView,
    /// Form overlay for a new task.
    CreateTaskView,
    /// Form overlay editing a task.
    EditTaskView,
    /// Settings in the main panel.
    SettingsView,
    /// Help overlay.
    HelpView,
}

impl ViewState {
    /// Whether the view shows the form overlay.
    #[must_use]
    pub fn is_form(self) -> bool {
        matches!(
            self,
            Self::CreateListView | Self::EditListView | Self::CreateTaskView | Self::EditTaskView
        )
    }

    /// How keys are interpreted in this view.
    #[must_use]
    pub fn input_mode(self) -> InputMode {
        if self.is_form() {
            InputMode::Form
        } else {
            InputMode::Navigation
        }
    }
}

/// Returns `index` moved by `delta`, wrapping within `0..len`.
fn wrap_index(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (index as i64 + i64::from(delta)).rem_euclid(len) as usize
}

/// The snapshot plus everything selected in it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// All lists, tasks and settings.
    pub data: Application,
    /// The active view.
    pub view: ViewState,
    /// The list whose tasks are shown.
    pub current_list: Option<ListId>,
    /// Selected row of the sidebar.
    pub list_index: usize,
    /// Selected row of the visible task projection.
    pub task_index: usize,
}

impl AppState {
    /// Wraps a freshly loaded snapshot; the first list, if any, becomes
    /// current.
    #[must_use]
    pub fn new(data: Application) -> Self {
        let current_list = data.todo_lists.first().map(|list| list.id.clone());
        Self {
            data,
            current_list,
            ..Self::default()
        }
    }

    /// The list whose tasks are shown.
    #[must_use]
    pub fn current_list(&self) -> Option<&TodoList> {
        self.current_list.as_ref().and_then(|id| self.data.list(id))
    }

    /// The list highlighted in the sidebar.
    #[must_use]
    pub fn selected_list(&self) -> Option<&TodoList> {
        self.data.todo_lists.get(self.list_index)
    }

    /// Tasks of the current list that are shown, honoring the
    /// show-completed setting.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let show_completed = self.data.settings.show_completed;
        self.current_list()
            .map(|list| {
                list.tasks
                    .iter()
                    .filter(|task| show_completed || !task.completed)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The task highlighted in the main panel.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.task_index).copied()
    }

    /// Moves the sidebar selection, wrapping around.
    pub fn move_list_selection(&mut self, delta: i32) {
        self.list_index = wrap_index(self.list_index, delta, self.data.todo_lists.len());
    }

    /// Moves the task selection, wrapping around.
    pub fn move_task_selection(&mut self, delta: i32) {
        self.task_index = wrap_index(self.task_index, delta, self.visible_tasks().len());
    }

    /// Makes the sidebar selection current and resets the task selection.
    /// Returns the new current list.
    pub fn open_selected_list(&mut self) -> Option<&TodoList> {
        let id = self.selected_list()?.id.clone();
        self.current_list = Some(id);
        self.task_index = 0;
        self.current_list()
    }

    /// Brings every selection back in range after the snapshot changed.
    ///
    /// A current list that no longer exists is replaced by the first list.
    pub fn clamp_selection(&mut self) {
        if self.current_list().is_none() {
            self.current_list = self.data.todo_lists.first().map(|list| list.id.clone());
            self.task_index = 0;
        }
        self.list_index = self
            .list_index
            .min(self.data.todo_lists.len().saturating_sub(1));
        self.task_index = self
            .task_index
            .min(self.visible_tasks().len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use lazytodo_model::TaskDraft;

    use super::*;

    fn state_with(lists: &[(&str, &[&str])]) -> AppState {
        let mut data = Application::default();
        for (name, tasks) in lists {
            let mut list = TodoList::new(*name, "");
            for title in *tasks {
                list.tasks.push(Task::new(TaskDraft::new(*title)));
            }
            data.todo_lists.push(list);
        }
        AppState::new(data)
    }

    #[test]
    fn first_list_becomes_current() {
        let state = state_with(&[("Work", &[]), ("Home", &[])]);
        assert_eq!(state.current_list().unwrap().name, "Work");
        assert_eq!(state.view, ViewState::ListsView);

        assert!(AppState::new(Application::default()).current_list.is_none());
    }

    #[test]
    fn list_selection_wraps() {
        let mut state = state_with(&[("a", &[]), ("b", &[]), ("c", &[])]);
        state.move_list_selection(-1);
        assert_eq!(state.selected_list().unwrap().name, "c");
        state.move_list_selection(1);
        assert_eq!(state.selected_list().unwrap().name, "a");
    }

    #[test]
    fn selection_on_empty_collections_stays_at_zero() {
        let mut state = AppState::default();
        state.move_list_selection(1);
        state.move_task_selection(-1);
        assert_eq!((state.list_index, state.task_index), (0, 0));
        assert!(state.selected_task().is_none());
    }

    #[test]
    fn hidden_completed_tasks_are_not_selectable() {
        let mut state = state_with(&[("Work", &["done", "open"])]);
        state.data.todo_lists[0].tasks[0].completed = true;

        assert_eq!(state.visible_tasks().len(), 2);
        state.data.settings.show_completed = false;
        let titles: Vec<_> = state.visible_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["open"]);
        assert_eq!(state.selected_task().unwrap().title, "open");
    }

    #[test]
    fn open_selected_list_switches_current() {
        let mut state = state_with(&[("Work", &["x"]), ("Home", &[])]);
        state.task_index = 3;
        state.move_list_selection(1);

        assert_eq!(state.open_selected_list().unwrap().name, "Home");
        assert_eq!(state.task_index, 0);
    }

    #[test]
    fn clamp_after_removal() {
        let mut state = state_with(&[("Work", &["a", "b"]), ("Home", &[])]);
        state.list_index = 1;
        state.task_index = 1;

        state.data.todo_lists[0].tasks.pop();
        state.data.todo_lists.pop();
        state.clamp_selection();
        assert_eq!((state.list_index, state.task_index), (0, 0));

        let work = state.data.todo_lists[0].id.clone();
        state.data.remove_list(&work);
        state.clamp_selection();
        assert!(state.current_list.is_none());
    }

    #[test]
    fn removed_current_list_falls_back_to_first() {
        let mut state = state_with(&[("Work", &[]), ("Home", &[])]);
        let work = state.current_list.clone().unwrap();
        state.data.remove_list(&work);
        state.clamp_selection();
        assert_eq!(state.current_list().unwrap().name, "Home");
    }

    #[test]
    fn form_views_use_form_input() {
        assert_eq!(ViewState::CreateTaskView.input_mode(), InputMode::Form);
        assert_eq!(ViewState::HelpView.input_mode(), InputMode::Navigation);
        assert!(!ViewState::SettingsView.is_form());
    }
}
