//! Helpers shared by the rendering and controller tests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::text::Text;

/// Renders a buffer as one line per row with trailing blanks removed.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.area.height {
        let row: String = (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)))
            .map(|cell| cell.symbol())
            .collect();
        out.push_str(row.trim_end_matches(' '));
        out.push('\n');
    }
    out
}

/// Flattens styled text to plain lines, dropping styles and trailing blanks.
#[must_use]
pub(crate) fn text_to_string(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            let row: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
            row.trim_end_matches(' ').to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A plain key press.
#[must_use]
pub(crate) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// A key press with modifiers.
#[must_use]
pub(crate) fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

/// `Ctrl` plus a character.
#[must_use]
pub(crate) fn ctrl(ch: char) -> KeyEvent {
    key_with(KeyCode::Char(ch), KeyModifiers::CONTROL)
}
