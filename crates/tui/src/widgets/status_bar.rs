//! Status bar content.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::layout::PanelId;
use crate::state::ViewState;
use crate::status::{MessageKind, StatusMessage};

/// Counters shown while no message is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    /// Number of lists.
    pub lists: usize,
    /// Completed tasks of the current list.
    pub completed: usize,
    /// All tasks of the current list.
    pub total: usize,
}

/// Builds the status bar.
///
/// An active message replaces everything else. Otherwise the bar shows
/// `Lists: N • Tasks: c/t • Focus: X` followed by key hints for `view`.
#[must_use]
pub fn status_text(
    counts: StatusCounts,
    focus: Option<PanelId>,
    view: ViewState,
    message: Option<&StatusMessage>,
) -> Text<'static> {
    if let Some(message) = message {
        let color = match message.kind {
            MessageKind::Success => Color::Green,
            MessageKind::Warning => Color::Yellow,
            MessageKind::Error => Color::Red,
            MessageKind::Info => Color::Cyan,
        };
        return Text::from(Line::from(Span::styled(
            message.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    let focus = focus.map_or("None", PanelId::name);
    let summary = format!(
        "Lists: {} • Tasks: {}/{} • Focus: {focus}",
        counts.lists, counts.completed, counts.total
    );

    let key_style = Style::default().fg(Color::Green);
    let mut spans = vec![Span::styled(summary, Style::default().fg(Color::White))];
    for (key, action) in hints(view) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Text::from(Line::from(spans))
}

fn hints(view: ViewState) -> &'static [(&'static str, &'static str)] {
    match view {
        ViewState::ListsView | ViewState::TasksView => {
            &[("?", "Help"), ("Tab", "Windows"), ("q", "Quit")]
        }
        ViewState::SettingsView => &[("←/→", "Adjust"), ("Esc", "Back"), ("q", "Quit")],
        ViewState::HelpView => &[("Esc", "Close help")],
        ViewState::CreateListView
        | ViewState::EditListView
        | ViewState::CreateTaskView
        | ViewState::EditTaskView => &[("Enter", "Save"), ("Esc", "Cancel")],
    }
}
