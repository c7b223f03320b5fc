//! User-adjustable application settings stored alongside the data.

use serde::{Deserialize, Serialize};

/// Default reminder lead time in minutes.
pub const DEFAULT_REMINDER_MINUTES: u32 = 60;

/// Smallest reminder lead time the settings view allows.
pub const MIN_REMINDER_MINUTES: u32 = 5;

/// Largest reminder lead time the settings view allows (one day).
pub const MAX_REMINDER_MINUTES: u32 = 1440;

/// Application settings.
///
/// # Examples
///
/// ```
/// use lazytodo_model::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.reminder_minutes, 60);
/// assert!(settings.show_completed);
/// assert!(settings.auto_save);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// How many minutes before a deadline a reminder is shown.
    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: u32,
    /// Whether completed tasks are listed.
    #[serde(default = "default_true")]
    pub show_completed: bool,
    /// Whether changes are saved automatically. Always on in practice.
    #[serde(default = "default_true")]
    pub auto_save: bool,
}

fn default_reminder_minutes() -> u32 {
    DEFAULT_REMINDER_MINUTES
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
            show_completed: true,
            auto_save: true,
        }
    }
}

impl Settings {
    /// Replaces an unusable snapshot with defaults.
    ///
    /// Data written by older versions may carry a zero reminder window, which
    /// means the settings block was never initialised.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.reminder_minutes == 0 {
            Self::default()
        } else {
            self
        }
    }

    /// Adjusts the reminder window by `steps` increments of `step` minutes,
    /// clamped to the supported range.
    pub fn adjust_reminder(&mut self, steps: i32, step: u32) {
        let delta = i64::from(steps) * i64::from(step);
        let next = (i64::from(self.reminder_minutes) + delta).clamp(
            i64::from(MIN_REMINDER_MINUTES),
            i64::from(MAX_REMINDER_MINUTES),
        );
        self.reminder_minutes = u32::try_from(next).unwrap_or(DEFAULT_REMINDER_MINUTES);
    }
}
