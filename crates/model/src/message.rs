//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the key mapping layer and the application controller.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// Key events are translated into messages before they reach the
/// controller; the same key may map to different messages depending on
/// whether a form is capturing text.
///
/// # Examples
///
/// ```
/// use lazytodo_model::Message;
///
/// let msg = Message::Input { ch: 'x' };
/// assert!(matches!(msg, Message::Input { ch: 'x' }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Quit the application.
    Quit,
    /// Show or hide the help overlay.
    ToggleHelp,

    // --- Window focus ---
    /// Focus the next window in the focus ring.
    NextWindow,
    /// Focus the previous window in the focus ring.
    PrevWindow,
    /// Focus the main (tasks) window.
    FocusMain,
    /// Focus the sidebar (lists) window.
    FocusSidebar,

    // --- Navigation ---
    /// Move the selection up.
    NavigateUp,
    /// Move the selection down.
    NavigateDown,
    /// Activate the selected item or submit the form.
    Select,
    /// Go back or cancel the current form.
    Back,

    // --- Commands ---
    /// Create a new list.
    NewList,
    /// Add a task to the current list.
    AddTask,
    /// Edit the selected list or task.
    Edit,
    /// Delete the selected list or task.
    Delete,
    /// Toggle completion of the selected task, or the selected setting.
    Toggle,
    /// Open the settings view.
    OpenSettings,
    /// Increase or decrease the selected setting.
    Adjust {
        /// Number of steps (positive = increase).
        delta: i32,
    },

    // --- Form editing ---
    /// Move to the next form field.
    NextField,
    /// Move to the previous form field.
    PrevField,
    /// Type a character into the focused field.
    Input {
        /// The character that was typed.
        ch: char,
    },
    /// Delete the character before the cursor.
    Backspace,
    /// Move the cursor one character left.
    CursorLeft,
    /// Move the cursor one character right.
    CursorRight,
    /// Cycle the priority of the task being edited.
    CyclePriority,
}
