//! Sidebar: one entry per todo list.

use lazytodo_model::{ListId, TodoList};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span, Text},
};

use super::{ListContent, hint_style, marker, selected_style};

/// Lines per list entry.
const ENTRY_HEIGHT: usize = 2;

/// Builds the sidebar.
///
/// Each list shows its name and `NN% complete (N tasks)`. The list whose
/// tasks are in the main panel is drawn in cyan unless it is also the
/// selected one.
///
/// # Examples
///
/// ```
/// use lazytodo_model::TodoList;
/// use lazytodo_tui::widgets::sidebar_text;
///
/// let lists = vec![TodoList::new("Work", ""), TodoList::new("Home", "")];
/// let content = sidebar_text(&lists, 1, None);
/// assert_eq!(content.selected_line, 2);
/// ```
#[must_use]
pub fn sidebar_text(lists: &[TodoList], selected: usize, current: Option<&ListId>) -> ListContent {
    if lists.is_empty() {
        return ListContent {
            text: Text::from(vec![
                Line::from(Span::styled(
                    "No lists yet",
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(""),
                Line::from(Span::styled("Press 'n' to create one", hint_style())),
            ]),
            ..ListContent::default()
        };
    }

    let mut lines = Vec::with_capacity(lists.len() * ENTRY_HEIGHT);
    for (index, list) in lists.iter().enumerate() {
        let is_selected = index == selected;
        let name_style = if is_selected {
            selected_style()
        } else if current == Some(&list.id) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(marker(is_selected), name_style),
            Span::styled(format!("📋 {}", list.name), name_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "     {:.0}% complete ({} tasks)",
                list.progress(),
                list.total_count()
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListContent {
        text: Text::from(lines),
        selected_line: selected.min(lists.len() - 1) * ENTRY_HEIGHT,
        selected_height: ENTRY_HEIGHT,
    }
}
