//! Help overlay content.
//!
//! Lists every key binding, grouped by where it applies. The content fits
//! the help overlay on an 80×24 screen without scrolling.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

/// Width of the key column.
const KEY_COLUMN: usize = 20;

/// Builds the help overlay body.
///
/// # Examples
///
/// ```
/// use lazytodo_tui::widgets::help_text;
///
/// let text = help_text();
/// assert!(text.lines.len() <= 18);
/// ```
#[must_use]
pub fn help_text() -> Text<'static> {
    Text::from(vec![
        section("Global"),
        binding("Tab / Shift+Tab", "Next / previous window"),
        binding("Ctrl+T / Ctrl+S", "Focus main / sidebar"),
        binding("? / F1", "Toggle help"),
        binding("q / Ctrl+C", "Quit"),
        Line::from(""),
        section("Lists & Tasks"),
        binding("↑ ↓ / k j", "Move selection"),
        binding("Enter / Esc", "Open list / back"),
        binding("n / a", "New list / add task"),
        binding("e / d", "Edit / delete selected"),
        binding("Space / s", "Toggle task / settings"),
        Line::from(""),
        section("Forms & Settings"),
        binding("Tab / Shift+Tab", "Next / previous field"),
        binding("Enter / Esc", "Save / cancel"),
        binding("Ctrl+P", "Cycle task priority"),
        binding("← → / - +", "Adjust setting"),
    ])
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {keys:<KEY_COLUMN$}"),
            Style::default().fg(Color::Green),
        ),
        Span::styled(action, Style::default().fg(Color::White)),
    ])
}
