//! Deadline reminders.
//!
//! A scan walks lists in order and tasks within each list in order and
//! reports the first incomplete task whose deadline is still ahead but
//! inside the reminder window. Scans are throttled to one per
//! [`SCAN_INTERVAL`].

use chrono::{DateTime, TimeDelta, Utc};
use lazytodo_model::Application;

/// Minimum time between two scans.
pub const SCAN_INTERVAL: TimeDelta = TimeDelta::minutes(1);

/// A task that is about to become due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Title of the task.
    pub title: String,
    /// Time left until the deadline.
    pub remaining: TimeDelta,
}

impl Reminder {
    /// The text shown in the status bar.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "⏰ Task '{}' is due in {}!",
            self.title,
            format_remaining(self.remaining)
        )
    }
}

/// Throttles reminder scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderClock {
    last_scan: Option<DateTime<Utc>>,
}

impl ReminderClock {
    /// Records a scan at `now` and returns `true`, unless the previous scan
    /// was less than [`SCAN_INTERVAL`] ago.
    pub fn try_begin(&mut self, now: DateTime<Utc>) -> bool {
        if self
            .last_scan
            .is_some_and(|last| now - last < SCAN_INTERVAL)
        {
            return false;
        }
        self.last_scan = Some(now);
        true
    }
}

/// Finds the first task due within `window_minutes` of `now`.
#[must_use]
pub fn find_due(app: &Application, window_minutes: u32, now: DateTime<Utc>) -> Option<Reminder> {
    let window = TimeDelta::minutes(i64::from(window_minutes));
    app.todo_lists
        .iter()
        .flat_map(|list| &list.tasks)
        .find_map(|task| {
            let remaining = task.time_until_deadline_at(now)?;
            (remaining > TimeDelta::zero() && remaining <= window).then(|| Reminder {
                title: task.title.clone(),
                remaining,
            })
        })
}

/// Formats a duration rounded to minutes: `45m`, `1h 5m`, `2h`.
#[must_use]
pub fn format_remaining(remaining: TimeDelta) -> String {
    let minutes = (remaining.num_seconds() + 30) / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use lazytodo_model::{Task, TaskDraft, TodoList};

    use super::*;

    fn app_with_deadlines(now: DateTime<Utc>, minutes: &[i64]) -> Application {
        let mut list = TodoList::new("Work", "");
        for (i, offset) in minutes.iter().enumerate() {
            let draft =
                TaskDraft::new(format!("task {i}")).deadline(now + TimeDelta::minutes(*offset));
            list.tasks.push(Task::new(draft));
        }
        Application {
            todo_lists: vec![list],
            ..Application::default()
        }
    }

    #[test]
    fn picks_the_task_inside_the_window() {
        let now = Utc::now();
        let app = app_with_deadlines(now, &[90, 30]);

        let reminder = find_due(&app, 60, now).unwrap();
        assert_eq!(reminder.title, "task 1");
        assert_eq!(reminder.message(), "⏰ Task 'task 1' is due in 30m!");
    }

    #[test]
    fn first_match_wins() {
        let now = Utc::now();
        let app = app_with_deadlines(now, &[50, 10]);
        assert_eq!(find_due(&app, 60, now).unwrap().title, "task 0");
    }

    #[test]
    fn ignores_overdue_completed_and_far_tasks() {
        let now = Utc::now();
        let mut app = app_with_deadlines(now, &[-5, 20, 600]);
        app.todo_lists[0].tasks[1].completed = true;
        assert_eq!(find_due(&app, 60, now), None);
    }

    #[test]
    fn scans_are_throttled_to_one_per_minute() {
        let now = Utc::now();
        let mut clock = ReminderClock::default();

        assert!(clock.try_begin(now));
        assert!(!clock.try_begin(now + TimeDelta::seconds(59)));
        assert!(clock.try_begin(now + TimeDelta::seconds(60)));
    }

    #[test]
    fn remaining_time_formats() {
        assert_eq!(format_remaining(TimeDelta::minutes(45)), "45m");
        assert_eq!(format_remaining(TimeDelta::minutes(65)), "1h 5m");
        assert_eq!(format_remaining(TimeDelta::minutes(120)), "2h");
        assert_eq!(format_remaining(TimeDelta::seconds(29 * 60 + 40)), "30m");
    }
}
