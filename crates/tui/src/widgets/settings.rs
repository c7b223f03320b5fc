//! Settings view content.

use lazytodo_model::Settings;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::{hint_style, marker, selected_style};
use crate::settings_state::{SettingsItem, SettingsState, reminder_range};

/// Width of the label column.
const LABEL_COLUMN: usize = 22;

/// Builds the settings rows shown in the main panel.
#[must_use]
pub fn settings_text(state: &SettingsState, settings: &Settings) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            "📝 Application Settings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for item in SettingsItem::ALL {
        let is_selected = item == state.selected();
        let style = if !item.is_editable() {
            Style::default().fg(Color::DarkGray)
        } else if is_selected {
            selected_style()
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker(is_selected), selected_style()),
            Span::styled(format!("{:<LABEL_COLUMN$}", item.label()), style),
            Span::styled(item.display_value(settings), style),
        ]));
    }

    let (min, max) = reminder_range();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Reminders appear up to {} minutes before a deadline ({min}-{max}).",
                settings.reminder_minutes,
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "↑/↓: select • ←/→: adjust • Space: toggle • Esc: back",
            hint_style(),
        )),
    ]);
    Text::from(lines)
}
