//! Settings view state.
//!
//! The settings view lists the three [`Settings`] fields. Only the reminder
//! window and the show-completed flag can be changed; auto-save is shown
//! read-only.

use lazytodo_model::Settings;
use lazytodo_model::settings::{MAX_REMINDER_MINUTES, MIN_REMINDER_MINUTES};

/// Minutes added or removed per adjustment of the reminder window.
pub const REMINDER_STEP: u32 = 5;

/// A row of the settings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    /// Minutes before a deadline a reminder appears.
    ReminderMinutes,
    /// Whether completed tasks are listed.
    ShowCompleted,
    /// Always-on auto-save.
    AutoSave,
}

impl SettingsItem {
    /// Rows in display order.
    pub const ALL: [Self; 3] = [Self::ReminderMinutes, Self::ShowCompleted, Self::AutoSave];

    /// Row label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ReminderMinutes => "Reminder time",
            Self::ShowCompleted => "Show completed tasks",
            Self::AutoSave => "Auto-save",
        }
    }

    /// Whether the row can be changed.
    #[must_use]
    pub fn is_editable(self) -> bool {
        !matches!(self, Self::AutoSave)
    }

    /// The row's current value as shown to the user.
    #[must_use]
    pub fn display_value(self, settings: &Settings) -> String {
        match self {
            Self::ReminderMinutes => format!("{} minutes", settings.reminder_minutes),
            Self::ShowCompleted => on_off(settings.show_completed).to_string(),
            Self::AutoSave => format!("{} (always on)", on_off(settings.auto_save)),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "On" } else { "Off" }
}

/// Selection within the settings view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsState {
    selected: usize,
}

impl SettingsState {
    /// The selected row.
    #[must_use]
    pub fn selected(&self) -> SettingsItem {
        SettingsItem::ALL[self.selected]
    }

    /// Moves the selection by `delta` rows, wrapping around.
    pub fn navigate(&mut self, delta: i32) {
        let len = SettingsItem::ALL.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }

    /// Adjusts the selected row by `delta` steps. Returns whether
    /// `settings` changed.
    pub fn adjust(&self, settings: &mut Settings, delta: i32) -> bool {
        match self.selected() {
            SettingsItem::ReminderMinutes => {
                let before = settings.reminder_minutes;
                settings.adjust_reminder(delta, REMINDER_STEP);
                settings.reminder_minutes != before
            }
            SettingsItem::ShowCompleted => self.toggle(settings),
            SettingsItem::AutoSave => false,
        }
    }

    /// Toggles the selected row if it is a flag. Returns whether `settings`
    /// changed.
    pub fn toggle(&self, settings: &mut Settings) -> bool {
        match self.selected() {
            SettingsItem::ShowCompleted => {
                settings.show_completed = !settings.show_completed;
                true
            }
            SettingsItem::ReminderMinutes | SettingsItem::AutoSave => false,
        }
    }
}

/// Inclusive range of the reminder window, for display.
#[must_use]
pub fn reminder_range() -> (u32, u32) {
    (MIN_REMINDER_MINUTES, MAX_REMINDER_MINUTES)
}
