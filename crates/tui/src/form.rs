//! Create/edit form state.
//!
//! A form is a small set of single-line text fields plus, for tasks, a
//! priority. Forms never touch the store; the controller reads the buffers
//! on submit.

use lazytodo_model::deadline::format_deadline;
use lazytodo_model::{ListId, Priority, TaskDraft, TaskId, TodoList};

/// A single-line text buffer with a cursor.
///
/// The cursor is a byte offset that always sits on a character boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    /// Creates a field holding `value` with the cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// The current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The cursor position in bytes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some((index, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.remove(index);
            self.cursor = index;
        }
    }

    /// Moves the cursor one character left.
    pub fn move_left(&mut self) {
        if let Some((index, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = index;
        }
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.value[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Splits the text around the cursor: before, the character under the
    /// cursor (if any), and after.
    #[must_use]
    pub fn split_at_cursor(&self) -> (&str, Option<char>, &str) {
        let (before, rest) = self.value.split_at(self.cursor);
        let mut chars = rest.chars();
        let under = chars.next();
        (before, under, chars.as_str())
    }
}

/// Which entity a form creates or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    /// A new list.
    NewList,
    /// An existing list.
    EditList(ListId),
    /// A new task in a list.
    NewTask(ListId),
    /// An existing task.
    EditTask(ListId, TaskId),
}

impl FormTarget {
    /// Whether the form edits a list rather than a task.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::NewList | Self::EditList(_))
    }

    /// Whether the form edits an existing entity.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::EditList(_) | Self::EditTask(..))
    }
}

/// Field labels of list forms.
pub const LIST_FIELDS: [&str; 2] = ["Name", "Description"];

/// Field labels of task forms.
pub const TASK_FIELDS: [&str; 3] = ["Title", "Description", "Deadline"];

/// Index of the deadline field in task forms.
pub const DEADLINE_FIELD: usize = 2;

/// Buffers of an open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    target: FormTarget,
    fields: Vec<InputField>,
    focused: usize,
    priority: Priority,
}

impl FormState {
    fn new(target: FormTarget, fields: Vec<InputField>, priority: Priority) -> Self {
        Self {
            target,
            fields,
            focused: 0,
            priority,
        }
    }

    /// An empty form for a new list.
    #[must_use]
    pub fn new_list() -> Self {
        Self::new(
            FormTarget::NewList,
            vec![InputField::default(); LIST_FIELDS.len()],
            Priority::default(),
        )
    }

    /// A form pre-filled from an existing list.
    #[must_use]
    pub fn edit_list(list: &TodoList) -> Self {
        Self::new(
            FormTarget::EditList(list.id.clone()),
            vec![
                InputField::with_value(&list.name),
                InputField::with_value(&list.description),
            ],
            Priority::default(),
        )
    }

    /// An empty form for a new task in `list`, defaulting to medium priority.
    #[must_use]
    pub fn new_task(list: ListId) -> Self {
        Self::new(
            FormTarget::NewTask(list),
            vec![InputField::default(); TASK_FIELDS.len()],
            Priority::Medium,
        )
    }

    /// A form pre-filled from an existing task, keeping its priority.
    #[must_use]
    pub fn edit_task(list: ListId, task: &lazytodo_model::Task) -> Self {
        let deadline = task.deadline.map(format_deadline).unwrap_or_default();
        Self::new(
            FormTarget::EditTask(list, task.id.clone()),
            vec![
                InputField::with_value(&task.title),
                InputField::with_value(&task.description),
                InputField::with_value(deadline),
            ],
            task.priority,
        )
    }

    /// What the form creates or edits.
    #[must_use]
    pub fn target(&self) -> &FormTarget {
        &self.target
    }

    /// Labels of the fields, in order.
    #[must_use]
    pub fn labels(&self) -> &'static [&'static str] {
        if self.target.is_list() {
            &LIST_FIELDS
        } else {
            &TASK_FIELDS
        }
    }

    /// All fields, in order.
    #[must_use]
    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    /// Index of the field receiving input.
    #[must_use]
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// The task priority (ignored by list forms).
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Text of the field at `index`, or `""` if there is none.
    #[must_use]
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", InputField::value)
    }

    /// Focuses the next field, wrapping around.
    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    /// Focuses the previous field, wrapping around.
    pub fn prev_field(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    fn active(&mut self) -> &mut InputField {
        &mut self.fields[self.focused]
    }

    /// Types a character into the focused field.
    pub fn insert_char(&mut self, ch: char) {
        self.active().insert_char(ch);
    }

    /// Deletes before the cursor in the focused field.
    pub fn backspace(&mut self) {
        self.active().backspace();
    }

    /// Moves the cursor left in the focused field.
    pub fn move_left(&mut self) {
        self.active().move_left();
    }

    /// Moves the cursor right in the focused field.
    pub fn move_right(&mut self) {
        self.active().move_right();
    }

    /// Advances the task priority.
    pub fn cycle_priority(&mut self) {
        if !self.target.is_list() {
            self.priority = self.priority.cycle();
        }
    }

    /// Builds a task draft from the trimmed buffers and an already parsed
    /// deadline.
    #[must_use]
    pub fn task_draft(&self, deadline: Option<chrono::DateTime<chrono::Utc>>) -> TaskDraft {
        let mut draft = TaskDraft::new(self.value(0).trim())
            .description(self.value(1).trim())
            .priority(self.priority);
        draft.deadline = deadline;
        draft
    }
}
