//! Create/edit form overlay content.

use lazytodo_model::deadline::DEADLINE_HINT;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::hint_style;
use crate::form::{DEADLINE_FIELD, FormState, FormTarget, InputField};

/// Title of the form overlay.
#[must_use]
pub fn form_title(form: &FormState) -> &'static str {
    match form.target() {
        FormTarget::NewList => "New List",
        FormTarget::EditList(_) => "Edit List",
        FormTarget::NewTask(_) => "New Task",
        FormTarget::EditTask(..) => "Edit Task",
    }
}

/// Builds the form body: a label and an input line per field, the priority
/// for task forms, and key hints.
///
/// ```text
/// Title:
/// ▸ Buy milk█
/// Description:
///   2 liters
/// Deadline (YYYY-MM-DD HH:MM):
///
/// Priority: ⚡ Medium  (Ctrl+P to change)
/// ```
#[must_use]
pub fn form_text(form: &FormState) -> Text<'static> {
    let label_style = Style::default().fg(Color::Cyan);
    let mut lines = Vec::new();

    for (index, (label, field)) in form.labels().iter().zip(form.fields()).enumerate() {
        let label = if !form.target().is_list() && index == DEADLINE_FIELD {
            format!("{label} ({DEADLINE_HINT}):")
        } else {
            format!("{label}:")
        };
        lines.push(Line::from(Span::styled(label, label_style)));
        lines.push(input_line(field, index == form.focused()));
    }

    if !form.target().is_list() {
        let priority = form.priority();
        let shown = match priority.icon() {
            Some(icon) => format!("{icon} {priority}"),
            None => priority.to_string(),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Priority: ", label_style),
            Span::styled(shown, Style::default().fg(Color::Yellow)),
            Span::styled("  (Ctrl+P to change)", hint_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: save • Esc: cancel • Tab: next field",
        hint_style(),
    )));
    Text::from(lines)
}

/// Renders a field; the focused one shows its cursor as a reversed cell.
fn input_line(field: &InputField, focused: bool) -> Line<'static> {
    if !focused {
        return Line::from(Span::styled(
            format!("  {}", field.value()),
            Style::default().fg(Color::Gray),
        ));
    }

    let text = Style::default().fg(Color::White);
    let (before, under, after) = field.split_at_cursor();
    let cursor = under.map_or_else(|| " ".to_string(), String::from);
    Line::from(vec![
        Span::styled("▸ ", Style::default().fg(Color::Yellow)),
        Span::styled(before.to_string(), text),
        Span::styled(cursor, text.add_modifier(Modifier::REVERSED)),
        Span::styled(after.to_string(), text),
    ])
}
