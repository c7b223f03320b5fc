//! Application controller and run loop.
//!
//! [`App`] is the single owner of the loaded snapshot, the panel layout and
//! every piece of view state. Events are processed one at a time, each to
//! completion: keys are translated to [`Message`]s and routed to the handler
//! of the current view and focused panel, store operations run
//! synchronously, and their outcome becomes a transient status message.

use std::fmt;

use chrono::{DateTime, Utc};
use lazytodo_model::deadline::{DEADLINE_HINT, parse_deadline};
use lazytodo_model::{Application, ListId, Message, Settings, TaskId};
use lazytodo_store::{Store, StoreError};
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::{
    event::{AppEvent, EventSource, key_to_message},
    form::{DEADLINE_FIELD, FormState, FormTarget},
    layout::{LayoutManager, PanelId, STATUS_HEIGHT},
    reminder::{ReminderClock, find_due},
    settings_state::SettingsState,
    state::{AppState, ViewState},
    status::{MessageKind, StatusMessage},
    terminal::AppTerminal,
    widgets::{
        ListContent, form_text, form_title, help_text, settings_text, sidebar_text,
        status_bar::StatusCounts, status_text, task_list_text, welcome_text,
    },
};

/// The controller.
pub struct App {
    store: Box<dyn Store>,
    state: AppState,
    layout: LayoutManager,
    /// Buffers of the open form; kept while help is shown over it.
    form: Option<FormState>,
    settings: SettingsState,
    /// View and focus to restore when help closes.
    help_return: Option<(ViewState, Option<PanelId>)>,
    status: Option<StatusMessage>,
    reminders: ReminderClock,
    should_quit: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store.describe())
            .field("state", &self.state)
            .field("form", &self.form)
            .field("status", &self.status)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates a controller over an already loaded snapshot.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazytodo_model::Application;
    /// use lazytodo_store::SqliteStore;
    /// use lazytodo_tui::App;
    /// use lazytodo_tui::state::ViewState;
    ///
    /// # fn main() -> lazytodo_store::Result<()> {
    /// let store = SqliteStore::open_in_memory()?;
    /// let app = App::new(Box::new(store), Application::default());
    /// assert_eq!(app.state().view, ViewState::ListsView);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(store: Box<dyn Store>, data: Application) -> Self {
        Self {
            store,
            state: AppState::new(data),
            layout: LayoutManager::new(),
            form: None,
            settings: SettingsState::default(),
            help_return: None,
            status: None,
            reminders: ReminderClock::default(),
            should_quit: false,
        }
    }

    /// Loads the snapshot from `store` and creates a controller over it.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the initial load fails.
    pub fn load(mut store: Box<dyn Store>) -> lazytodo_store::Result<Self> {
        let data = store.load()?;
        info!(
            lists = data.todo_lists.len(),
            tasks = data.total_tasks(),
            "snapshot loaded"
        );
        Ok(Self::new(store, data))
    }

    /// Current view, snapshot and selections.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Panel layout.
    #[must_use]
    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    /// The open form, if any.
    #[must_use]
    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// The last status message, active or not.
    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Releases the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error if closing fails.
    pub fn close(mut self) -> lazytodo_store::Result<()> {
        self.store.close()
    }

    /// Processes one event. A reminder tick scans at the time it carries.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                if let Some(msg) = key_to_message(key, self.state.view.input_mode()) {
                    self.update(msg);
                }
            }
            AppEvent::Resize(width, height) => self.layout.set_screen_size(width, height),
            AppEvent::ReminderTick(at) => self.check_reminders(at),
            AppEvent::Redraw => {}
        }
    }

    /// Applies a message to the current view.
    ///
    /// Quit and help work everywhere. While help is shown only closing it
    /// does anything; forms take every other message. Otherwise window
    /// messages move focus, and the rest go to the handler of the focused
    /// panel.
    pub fn update(&mut self, msg: Message) {
        debug!(?msg, view = ?self.state.view, focus = ?self.layout.focused(), "update");
        match msg {
            Message::Quit => self.should_quit = true,
            Message::ToggleHelp => self.toggle_help(),
            Message::Back if self.state.view == ViewState::HelpView => self.toggle_help(),
            _ if self.state.view == ViewState::HelpView => {}
            _ if self.state.view.is_form() => self.handle_form(msg),
            Message::NextWindow => self.layout.next_focus(),
            Message::PrevWindow => self.layout.prev_focus(),
            Message::FocusMain => self.layout.set_focus(PanelId::Main),
            Message::FocusSidebar => self.layout.set_focus(PanelId::Sidebar),
            _ => match self.layout.focused() {
                Some(PanelId::Sidebar) => self.handle_sidebar(msg),
                Some(PanelId::Main) if self.state.view == ViewState::SettingsView => {
                    self.handle_settings(msg);
                }
                Some(PanelId::Main) => self.handle_tasks(msg),
                _ => {}
            },
        }
    }

    /// Runs a reminder scan unless one ran less than a minute ago.
    pub fn check_reminders(&mut self, now: DateTime<Utc>) {
        if !self.reminders.try_begin(now) {
            return;
        }
        let window = self.state.data.settings.reminder_minutes;
        if let Some(reminder) = find_due(&self.state.data, window, now) {
            info!(task = %reminder.title, remaining = %reminder.remaining, "deadline reminder");
            self.status = Some(StatusMessage::new(reminder.message(), MessageKind::Info, now));
        }
    }

    /// Draws the whole screen.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.layout.set_screen_size(area.width, area.height);
        self.refresh_panels(Utc::now());
        self.layout.render(frame.buffer_mut());
    }

    /// Runs the event loop until the user quits or the event stream ends.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lazytodo_store::SqliteStore;
    /// use lazytodo_tui::{App, EventSource, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let store = SqliteStore::open_in_memory()?;
    ///     let mut app = App::load(Box::new(store))?;
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut events = EventSource::spawn();
    ///     app.run(&mut terminal, &mut events).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(
        &mut self,
        terminal: &mut AppTerminal,
        events: &mut EventSource,
    ) -> anyhow::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.view(frame))?;
            let Some(event) = events.next().await else {
                warn!("event stream closed");
                break;
            };
            self.handle_event(event);
        }
        Ok(())
    }

    fn handle_sidebar(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.state.move_list_selection(-1),
            Message::NavigateDown => self.state.move_list_selection(1),
            Message::NewList => self.open_form(ViewState::CreateListView, FormState::new_list()),
            Message::OpenSettings => self.open_settings(),
            Message::Select => {
                if let Some(name) = self.state.open_selected_list().map(|list| list.name.clone()) {
                    self.state.view = ViewState::TasksView;
                    self.layout.set_focus(PanelId::Main);
                    self.notify(format!("Switched to {name}"), MessageKind::Success);
                }
            }
            Message::Edit => {
                if let Some(form) = self.state.selected_list().map(FormState::edit_list) {
                    self.open_form(ViewState::EditListView, form);
                }
            }
            Message::Delete => {
                let Some(id) = self.state.selected_list().map(|list| list.id.clone()) else {
                    return;
                };
                match self.store.delete_list(&mut self.state.data, &id) {
                    Ok(()) => self.committed("List deleted successfully", MessageKind::Success),
                    Err(err) => self.report(&err),
                }
            }
            _ => {}
        }
    }

    fn handle_tasks(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.state.move_task_selection(-1),
            Message::NavigateDown => self.state.move_task_selection(1),
            Message::Back => {
                self.state.view = ViewState::ListsView;
                self.layout.set_focus(PanelId::Sidebar);
            }
            Message::NewList => self.open_form(ViewState::CreateListView, FormState::new_list()),
            Message::OpenSettings => self.open_settings(),
            Message::AddTask => match self.state.current_list.clone() {
                Some(list) => self.open_form(ViewState::CreateTaskView, FormState::new_task(list)),
                None => self.notify("Create a list first", MessageKind::Warning),
            },
            Message::Edit => {
                let form = self.state.current_list.clone().and_then(|list| {
                    let task = self.state.selected_task()?;
                    Some(FormState::edit_task(list, task))
                });
                if let Some(form) = form {
                    self.open_form(ViewState::EditTaskView, form);
                }
            }
            Message::Toggle => {
                let Some((list, task)) = self.selected_task_ids() else {
                    return;
                };
                match self.store.toggle_task(&mut self.state.data, &list, &task) {
                    Ok(true) => self.committed("Task completed", MessageKind::Success),
                    Ok(false) => self.committed("Task uncompleted", MessageKind::Info),
                    Err(err) => self.report(&err),
                }
            }
            Message::Delete => {
                let Some((list, task)) = self.selected_task_ids() else {
                    return;
                };
                match self.store.delete_task(&mut self.state.data, &list, &task) {
                    Ok(()) => self.committed("Task deleted successfully", MessageKind::Success),
                    Err(err) => self.report(&err),
                }
            }
            _ => {}
        }
    }

    fn handle_settings(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.settings.navigate(-1),
            Message::NavigateDown => self.settings.navigate(1),
            Message::Adjust { delta } => {
                self.change_settings(|state, settings| state.adjust(settings, delta));
            }
            Message::Select | Message::Toggle => {
                self.change_settings(|state, settings| state.toggle(settings));
            }
            Message::Back => {
                self.state.view = ViewState::TasksView;
                self.layout.set_focus(PanelId::Main);
            }
            _ => {}
        }
    }

    fn handle_form(&mut self, msg: Message) {
        match msg {
            Message::Back => {
                debug!(view = ?self.state.view, "form cancelled");
                self.close_form();
                return;
            }
            Message::Select => {
                self.submit_form();
                return;
            }
            _ => {}
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };
        match msg {
            Message::NextField => form.next_field(),
            Message::PrevField => form.prev_field(),
            Message::Input { ch } => form.insert_char(ch),
            Message::Backspace => form.backspace(),
            Message::CursorLeft => form.move_left(),
            Message::CursorRight => form.move_right(),
            Message::CyclePriority => form.cycle_priority(),
            _ => {}
        }
    }

    fn toggle_help(&mut self) {
        if self.state.view == ViewState::HelpView {
            let (view, focus) = self
                .help_return
                .take()
                .unwrap_or((ViewState::ListsView, Some(PanelId::Main)));
            self.set_view(view);
            if let Some(focus) = focus {
                self.layout.set_focus(focus);
            }
        } else {
            self.help_return = Some((self.state.view, self.layout.focused()));
            self.set_view(ViewState::HelpView);
            self.layout.set_focus(PanelId::Help);
        }
    }

    fn open_settings(&mut self) {
        self.state.view = ViewState::SettingsView;
        self.layout.set_focus(PanelId::Main);
    }

    fn open_form(&mut self, view: ViewState, form: FormState) {
        debug!(?view, target = ?form.target(), "opening form");
        self.form = Some(form);
        self.set_view(view);
        self.layout.set_focus(PanelId::Form);
    }

    /// Discards the form and returns to the view it was opened from.
    fn close_form(&mut self) {
        let list_form = self.form.as_ref().is_none_or(|form| form.target().is_list());
        self.form = None;
        if list_form {
            self.set_view(ViewState::ListsView);
            self.layout.set_focus(PanelId::Sidebar);
        } else {
            self.set_view(ViewState::TasksView);
            self.layout.set_focus(PanelId::Main);
        }
    }

    /// Switches view and shows exactly the overlay that view needs.
    fn set_view(&mut self, view: ViewState) {
        self.state.view = view;
        self.layout.set_visible(PanelId::Form, view.is_form());
        self.layout
            .set_visible(PanelId::Help, view == ViewState::HelpView);
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        let submitted = self.apply_form(&form);
        self.form = Some(form);
        if submitted {
            self.close_form();
        }
    }

    /// Validates the form and runs the store operation it describes.
    /// Returns whether the operation went through.
    fn apply_form(&mut self, form: &FormState) -> bool {
        let title = form.value(0).trim();
        if title.is_empty() {
            self.notify(
                format!("{} is required", form.labels()[0]),
                MessageKind::Warning,
            );
            return false;
        }
        let description = form.value(1).trim();

        let deadline = if form.target().is_list() {
            None
        } else {
            match parse_deadline(form.value(DEADLINE_FIELD)) {
                Ok(deadline) => deadline,
                Err(err) => {
                    debug!(error = %err, "rejected deadline");
                    self.notify(
                        format!("Invalid deadline format (use {DEADLINE_HINT})"),
                        MessageKind::Warning,
                    );
                    return false;
                }
            }
        };

        let data = &mut self.state.data;
        let result = match form.target() {
            FormTarget::NewList => self
                .store
                .create_list(data, title, description)
                .map(|_| "List created successfully"),
            FormTarget::EditList(id) => self
                .store
                .update_list(data, id, title, description)
                .map(|()| "List updated successfully"),
            FormTarget::NewTask(list) => self
                .store
                .create_task(data, list, form.task_draft(deadline))
                .map(|_| "Task created successfully"),
            FormTarget::EditTask(list, task) => self
                .store
                .update_task(data, list, task, form.task_draft(deadline))
                .map(|()| "Task updated successfully"),
        };

        match result {
            Ok(text) => {
                self.committed(text, MessageKind::Success);
                true
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    /// Applies a settings change and saves it; the change is rolled back if
    /// saving fails.
    fn change_settings(&mut self, change: impl FnOnce(&SettingsState, &mut Settings) -> bool) {
        let before = self.state.data.settings;
        if !change(&self.settings, &mut self.state.data.settings) {
            return;
        }
        match self.store.save(&self.state.data) {
            Ok(()) => {
                self.state.clamp_selection();
                self.notify("Settings saved", MessageKind::Success);
            }
            Err(err) => {
                self.state.data.settings = before;
                self.report(&err);
            }
        }
    }

    fn selected_task_ids(&self) -> Option<(ListId, TaskId)> {
        let list = self.state.current_list.clone()?;
        let task = self.state.selected_task()?.id.clone();
        Some((list, task))
    }

    /// Follows up a successful store mutation: selections are clamped to the
    /// new snapshot, the user is told, and the snapshot is saved.
    fn committed(&mut self, text: &str, kind: MessageKind) {
        self.state.clamp_selection();
        self.notify(text, kind);
        if let Err(err) = self.store.save(&self.state.data) {
            warn!(error = %err, "saving snapshot failed");
            self.notify(format!("Failed to save: {err}"), MessageKind::Error);
        }
    }

    fn report(&mut self, err: &StoreError) {
        warn!(error = %err, view = ?self.state.view, "store operation failed");
        self.notify(format!("Error: {err}"), MessageKind::Error);
    }

    fn notify(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.status = Some(StatusMessage::new(text, kind, Utc::now()));
    }

    /// Rebuilds every panel's title and content from the current state.
    fn refresh_panels(&mut self, now: DateTime<Utc>) {
        let sidebar = sidebar_text(
            &self.state.data.todo_lists,
            self.state.list_index,
            self.state.current_list.as_ref(),
        );
        self.layout.set_title(PanelId::Sidebar, "📋 Todo Lists");
        self.show_list(PanelId::Sidebar, sidebar);

        if self.state.view == ViewState::SettingsView {
            self.layout.set_title(PanelId::Main, "⚙️ Settings");
            self.layout.set_scroll(PanelId::Main, 0);
            self.layout.set_content(
                PanelId::Main,
                settings_text(&self.settings, &self.state.data.settings),
            );
        } else {
            let tasks = self.state.current_list().map(|list| {
                let visible = self.state.visible_tasks();
                let hidden = list.tasks.len() - visible.len();
                (
                    format!("📝 {}", list.name),
                    task_list_text(&visible, self.state.task_index, hidden, now),
                )
            });
            match tasks {
                Some((title, content)) => {
                    self.layout.set_title(PanelId::Main, title);
                    self.show_list(PanelId::Main, content);
                }
                None => {
                    self.layout.set_title(PanelId::Main, "🚀 Welcome");
                    self.layout.set_scroll(PanelId::Main, 0);
                    self.layout.set_content(PanelId::Main, welcome_text());
                }
            }
        }

        if self.status.as_ref().is_some_and(|msg| !msg.is_active_at(now)) {
            self.status = None;
        }
        let status_rows = self.layout.panel(PanelId::Status).rect().height;
        self.layout
            .set_border(PanelId::Status, status_rows >= STATUS_HEIGHT);
        let current = self.state.current_list();
        let counts = StatusCounts {
            lists: self.state.data.todo_lists.len(),
            completed: current.map_or(0, |list| list.completed_count()),
            total: current.map_or(0, |list| list.total_count()),
        };
        let status = status_text(
            counts,
            self.layout.focused(),
            self.state.view,
            self.status.as_ref(),
        );
        self.layout.set_content(PanelId::Status, status);

        if let Some(form) = &self.form {
            let (title, content) = (form_title(form), form_text(form));
            self.layout.set_title(PanelId::Form, title);
            self.layout.set_content(PanelId::Form, content);
        }
        self.layout.set_title(PanelId::Help, "❓ Help (Esc to close)");
        self.layout.set_content(PanelId::Help, help_text());
    }

    /// Shows a list and scrolls its selected item into view.
    fn show_list(&mut self, id: PanelId, content: ListContent) {
        let rows = usize::from(self.layout.panel(id).inner_height());
        let bottom = content.selected_line + content.selected_height;
        let scroll = bottom.saturating_sub(rows).min(content.selected_line);
        self.layout
            .set_scroll(id, u16::try_from(scroll).unwrap_or(u16::MAX));
        self.layout.set_content(id, content.text);
    }
}
