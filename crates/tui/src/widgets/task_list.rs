//! Main panel task list and the welcome screen.

use chrono::{DateTime, Utc};
use lazytodo_model::Task;
use lazytodo_model::deadline::format_deadline;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::{ListContent, hint_style, marker, selected_style};

/// Indent of the detail lines under a task title.
const DETAIL_INDENT: &str = "     ";

/// Builds the task list of the current list.
///
/// `tasks` is the visible projection; `hidden` is how many completed tasks
/// it leaves out. Deadlines are classified against `now`.
#[must_use]
pub fn task_list_text(
    tasks: &[&Task],
    selected: usize,
    hidden: usize,
    now: DateTime<Utc>,
) -> ListContent {
    if tasks.is_empty() {
        let lines = if hidden > 0 {
            vec![
                Line::from(Span::styled(
                    "🎉 All tasks completed!",
                    Style::default().fg(Color::Green),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{hidden} completed tasks are hidden (see settings)"),
                    hint_style(),
                )),
            ]
        } else {
            vec![
                Line::from(Span::styled("No tasks yet", Style::default().fg(Color::Cyan))),
                Line::from(""),
                Line::from(Span::styled("Press 'a' to add a task", hint_style())),
            ]
        };
        return ListContent {
            text: Text::from(lines),
            ..ListContent::default()
        };
    }

    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut selected_height = 0;
    for (index, task) in tasks.iter().enumerate() {
        let is_selected = index == selected;
        let start = lines.len();
        lines.extend(task_lines(task, is_selected, now));
        if is_selected {
            selected_line = start;
            selected_height = lines.len() - start;
        }
    }

    ListContent {
        text: Text::from(lines),
        selected_line,
        selected_height,
    }
}

fn task_lines(task: &Task, selected: bool, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let (check, title_style) = if task.completed {
        (
            "✓",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else if selected {
        ("○", selected_style())
    } else {
        ("○", Style::default().fg(Color::White))
    };

    let mut title = vec![
        Span::styled(marker(selected), selected_style()),
        Span::styled(format!("{check} "), title_style),
        Span::styled(task.title.clone(), title_style),
    ];
    if let Some(icon) = task.priority.icon() {
        title.push(Span::raw(format!(" {icon}")));
    }

    let mut lines = vec![Line::from(title)];
    if !task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{DETAIL_INDENT}{}", task.description),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(deadline) = deadline_line(task, now) {
        lines.push(deadline);
    }
    lines
}

/// `📅 Due: …`, `⏰ Due: … (SOON)` or `⚠️ Due: … (OVERDUE)`.
fn deadline_line(task: &Task, now: DateTime<Utc>) -> Option<Line<'static>> {
    let due = format_deadline(task.deadline?);
    let (text, color) = if task.is_overdue_at(now) {
        (format!("⚠️ Due: {due} (OVERDUE)"), Color::Red)
    } else if task.is_due_soon_at(now) {
        (format!("⏰ Due: {due} (SOON)"), Color::Yellow)
    } else {
        (format!("📅 Due: {due}"), Color::DarkGray)
    };
    Some(Line::from(Span::styled(
        format!("{DETAIL_INDENT}{text}"),
        Style::default().fg(color),
    )))
}

/// Shown in the main panel while there are no lists.
#[must_use]
pub fn welcome_text() -> Text<'static> {
    let feature = Style::default().fg(Color::Gray);
    Text::from(vec![
        Line::from(Span::styled(
            "🚀 Welcome to LazyTodo!",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'n' to create your first list",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled("📋 Separate lists for projects or contexts", feature)),
        Line::from(Span::styled("⚡ Priorities from Low to Critical", feature)),
        Line::from(Span::styled("📅 Deadlines with reminders", feature)),
        Line::from(Span::styled("✅ Progress per list", feature)),
        Line::from(""),
        Line::from(Span::styled("Press ? for all key bindings", hint_style())),
    ])
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use lazytodo_model::{Priority, TaskDraft};

    use super::*;
    use crate::test_utils::text_to_string;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn task(title: &str) -> Task {
        Task::new(TaskDraft::new(title))
    }

    fn render(tasks: &[Task], selected: usize) -> String {
        let refs: Vec<&Task> = tasks.iter().collect();
        text_to_string(&task_list_text(&refs, selected, 0, now()).text)
    }

    #[test]
    fn marks_completion_and_priority() {
        let mut done = Task::new(TaskDraft::new("Ship").priority(Priority::Critical));
        done.completed = true;
        let output = render(&[task("Plan"), done], 0);

        assert!(output.contains("▸ ○ Plan ⚡"));
        assert!(output.contains("  ✓ Ship 🚨"));
    }

    #[test]
    fn low_priority_has_no_indicator() {
        let low = Task::new(TaskDraft::new("Later").priority(Priority::Low));
        let output = render(&[low], 0);
        assert_eq!(output.lines().next(), Some("▸ ○ Later"));
    }

    #[test]
    fn deadline_states() {
        let overdue = Task::new(TaskDraft::new("late").deadline(now() - TimeDelta::hours(1)));
        let soon = Task::new(TaskDraft::new("soon").deadline(now() + TimeDelta::hours(2)));
        let later = Task::new(TaskDraft::new("later").deadline(now() + TimeDelta::days(7)));
        let output = render(&[overdue, soon, later], 0);

        assert!(output.contains("(OVERDUE)"));
        assert!(output.contains("⏰ Due:"));
        assert!(output.contains("(SOON)"));
        assert!(output.contains("📅 Due:"));
    }

    #[test]
    fn selection_spans_all_lines_of_a_task() {
        let detailed = Task::new(
            TaskDraft::new("Report")
                .description("quarterly")
                .deadline(now() + TimeDelta::days(3)),
        );
        let tasks = [task("first"), detailed];
        let refs: Vec<&Task> = tasks.iter().collect();

        let content = task_list_text(&refs, 1, 0, now());
        assert_eq!(content.selected_line, 1);
        assert_eq!(content.selected_height, 3);
    }

    #[test]
    fn empty_states() {
        let none = text_to_string(&task_list_text(&[], 0, 0, now()).text);
        assert!(none.contains("Press 'a'"));

        let hidden = text_to_string(&task_list_text(&[], 0, 2, now()).text);
        assert!(hidden.contains("All tasks completed!"));
        assert!(hidden.contains("2 completed tasks are hidden"));
    }

    #[test]
    fn welcome_mentions_new_list_key() {
        assert!(text_to_string(&welcome_text()).contains("Press 'n'"));
    }
}
