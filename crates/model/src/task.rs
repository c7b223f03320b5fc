//! Task-related types.
//!
//! This module defines the task priority scale, the [`Task`] entity and the
//! [`TaskDraft`] used to create or edit one, along with the deadline-derived
//! predicates the UI evaluates on every render.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::id::TaskId;

/// How far ahead of a deadline a task counts as "due soon".
pub const DUE_SOON_HOURS: i64 = 24;

/// The priority of a task.
///
/// Priorities are ordered (`Low < Medium < High < Critical`) and persisted as
/// their integer value so that stored data stays compact and sortable.
///
/// # Examples
///
/// ```
/// use lazytodo_model::Priority;
///
/// assert!(Priority::Low < Priority::Critical);
/// assert_eq!(Priority::High.cycle(), Priority::Critical);
/// assert_eq!(Priority::Critical.cycle(), Priority::Low);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    /// Nice to have.
    #[default]
    Low,
    /// The default for new tasks.
    Medium,
    /// Needs attention soon.
    High,
    /// Drop everything.
    Critical,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the next priority, wrapping from `Critical` back to `Low`.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Critical,
            Self::Critical => Self::Low,
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Returns the indicator glyph shown next to a task, if any.
    ///
    /// Low priority tasks carry no indicator.
    #[must_use]
    pub const fn icon(self) -> Option<&'static str> {
        match self {
            Self::Low => None,
            Self::Medium => Some("⚡"),
            Self::High => Some("🔥"),
            Self::Critical => Some("🚨"),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            3 => Ok(Self::Critical),
            other => Err(ModelError::InvalidPriority(other)),
        }
    }
}

/// The user-editable fields of a task.
///
/// Drafts are what forms produce and what the persistence layer consumes
/// when creating or updating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title; callers validate that it is non-empty.
    pub title: String,
    /// Free-form description, empty when absent.
    pub description: String,
    /// Task priority.
    pub priority: Priority,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the given title, an empty description, `Medium`
    /// priority and no deadline.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::Medium,
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A single task inside a todo list.
///
/// # Examples
///
/// ```
/// use lazytodo_model::{Priority, Task, TaskDraft};
///
/// let task = Task::new(TaskDraft::new("Write report").priority(Priority::High));
/// assert_eq!(task.title, "Write report");
/// assert!(!task.completed);
/// assert!(!task.is_overdue());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Short summary.
    pub title: String,
    /// Longer description, empty when absent.
    #[serde(default)]
    pub description: String,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Task priority.
    #[serde(default)]
    pub priority: Priority,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last modified.
    pub updated_at: DateTime<Utc>,
    /// Optional deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new, incomplete task from a draft with a freshly generated ID.
    #[must_use]
    pub fn new(draft: TaskDraft) -> Self {
        Self::with_id(TaskId::generate(), draft, Utc::now())
    }

    /// Creates a task with an explicit ID and creation time.
    #[must_use]
    pub fn with_id(id: TaskId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
            deadline: draft.deadline,
        }
    }

    /// Replaces the editable fields with those of `draft`.
    pub fn apply(&mut self, draft: TaskDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.description = draft.description;
        self.priority = draft.priority;
        self.deadline = draft.deadline;
        self.updated_at = now;
    }

    /// Flips the completed flag and returns the new value.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> bool {
        self.completed = !self.completed;
        self.updated_at = now;
        self.completed
    }

    /// Returns a draft holding this task's editable fields.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            deadline: self.deadline,
        }
    }

    /// Returns the time left until the deadline of an incomplete task.
    ///
    /// The result is negative once the deadline has passed. Completed tasks
    /// and tasks without a deadline return `None`.
    #[must_use]
    pub fn time_until_deadline_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        if self.completed {
            return None;
        }
        self.deadline.map(|deadline| deadline - now)
    }

    /// Returns `true` if the task is incomplete and its deadline is before `now`.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.time_until_deadline_at(now)
            .is_some_and(|left| left < TimeDelta::zero())
    }

    /// Returns `true` if the task is incomplete, not overdue, and due within
    /// [`DUE_SOON_HOURS`] of `now`.
    #[must_use]
    pub fn is_due_soon_at(&self, now: DateTime<Utc>) -> bool {
        self.time_until_deadline_at(now).is_some_and(|left| {
            left >= TimeDelta::zero() && left <= TimeDelta::hours(DUE_SOON_HOURS)
        })
    }

    /// [`is_overdue_at`](Self::is_overdue_at) evaluated against the current time.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    /// [`is_due_soon_at`](Self::is_due_soon_at) evaluated against the current time.
    #[must_use]
    pub fn is_due_soon(&self) -> bool {
        self.is_due_soon_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap()
    }

    fn task_due(deadline: DateTime<Utc>) -> Task {
        Task::with_id(
            TaskId::from("t1"),
            TaskDraft::new("Pay rent").deadline(deadline),
            at(0, 0),
        )
    }

    #[test]
    fn priority_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "3");

        let parsed: Priority = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Priority::High);

        assert!(serde_json::from_str::<Priority>("9").is_err());
    }

    #[test]
    fn priority_cycle_visits_every_level() {
        let mut priority = Priority::Low;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(priority);
            priority = priority.cycle();
        }
        assert_eq!(seen, Priority::ALL);
        assert_eq!(priority, Priority::Low);
    }

    #[test]
    fn overdue_when_deadline_passed() {
        let task = task_due(at(9, 0));
        assert!(task.is_overdue_at(at(10, 0)));
        assert!(!task.is_due_soon_at(at(10, 0)));
    }

    #[test]
    fn due_soon_within_a_day() {
        let task = task_due(at(18, 0));
        assert!(task.is_due_soon_at(at(10, 0)));
        assert!(!task.is_overdue_at(at(10, 0)));
    }

    #[test]
    fn not_due_soon_when_far_away() {
        let deadline = at(10, 0) + TimeDelta::hours(48);
        let task = task_due(deadline);
        assert!(!task.is_due_soon_at(at(10, 0)));
        assert!(!task.is_overdue_at(at(10, 0)));
    }

    #[test]
    fn completed_tasks_are_never_flagged() {
        let mut task = task_due(at(9, 0));
        task.toggle(at(8, 0));
        assert!(!task.is_overdue_at(at(10, 0)));
        assert!(!task.is_due_soon_at(at(8, 30)));
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut task = task_due(at(9, 0));
        assert!(task.toggle(at(1, 0)));
        assert!(!task.toggle(at(2, 0)));
        assert!(!task.completed);
        assert_eq!(task.updated_at, at(2, 0));
    }

    #[test]
    fn apply_replaces_editable_fields() {
        let mut task = task_due(at(9, 0));
        let created = task.created_at;
        task.apply(
            TaskDraft::new("Pay rent early")
                .description("before the 1st")
                .priority(Priority::Critical),
            at(3, 0),
        );

        assert_eq!(task.title, "Pay rent early");
        assert_eq!(task.description, "before the 1st");
        assert_eq!(task.priority, Priority::Critical);
        assert_eq!(task.deadline, None);
        assert_eq!(task.created_at, created);
        assert_eq!(task.updated_at, at(3, 0));
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "id": "42",
            "title": "Legacy task",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "42");
        assert_eq!(task.priority, Priority::Low);
        assert!(task.description.is_empty());
        assert!(task.deadline.is_none());
    }
}

#[cfg(test)]
mod proptest_tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;

    impl Arbitrary for Priority {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(Priority::Low),
                Just(Priority::Medium),
                Just(Priority::High),
                Just(Priority::Critical),
            ]
            .boxed()
        }
    }

    prop_compose! {
        fn arb_task()(
            title in "[a-zA-Z][a-zA-Z0-9 ]{0,30}",
            priority in any::<Priority>(),
            completed in any::<bool>(),
            deadline_offset in proptest::option::of(-100_000i64..100_000i64),
        ) -> Task {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
            let mut draft = TaskDraft::new(title).priority(priority);
            draft.deadline = deadline_offset.map(|minutes| base + TimeDelta::minutes(minutes));
            let mut task = Task::with_id(TaskId::from("p"), draft, base);
            task.completed = completed;
            task
        }
    }

    proptest! {
        /// Overdue and due-soon are mutually exclusive for every clock reading.
        #[test]
        fn overdue_excludes_due_soon(task in arb_task(), offset in -100_000i64..100_000i64) {
            let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
                + TimeDelta::minutes(offset);
            prop_assert!(!(task.is_overdue_at(now) && task.is_due_soon_at(now)));
        }

        /// Neither flag is raised for completed tasks or tasks without a deadline.
        #[test]
        fn flags_require_open_task_with_deadline(task in arb_task(), offset in -100_000i64..100_000i64) {
            let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
                + TimeDelta::minutes(offset);
            if task.completed || task.deadline.is_none() {
                prop_assert!(!task.is_overdue_at(now));
                prop_assert!(!task.is_due_soon_at(now));
            }
        }

        /// Priorities survive a trip through their integer form.
        #[test]
        fn priority_integer_roundtrip(priority in any::<Priority>()) {
            let value = i64::from(priority);
            prop_assert_eq!(Priority::try_from(value).unwrap(), priority);
        }
    }
}
