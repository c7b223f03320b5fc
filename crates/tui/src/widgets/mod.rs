//! Panel content builders.
//!
//! Widgets here do not draw. Each one turns a piece of controller state into
//! the styled [`Text`](ratatui::text::Text) a panel shows, and
//! [`LayoutManager`](crate::layout::LayoutManager) owns borders, placement
//! and drawing. Builders are pure functions of their arguments, including
//! the current time where deadlines matter, which keeps them easy to test.
//!
//! # Modules
//!
//! - [`sidebar`]: todo lists with their progress
//! - [`task_list`]: tasks of the current list, or the welcome text
//! - [`status_bar`]: counters, focus and key hints, or a transient message
//! - [`form`]: create/edit form overlay
//! - [`help`]: key binding overlay
//! - [`settings`]: settings rows in the main panel
//!
//! # Colors
//!
//! | Element | Color |
//! |---------|-------|
//! | Selected row | Yellow, bold |
//! | Completed task | Dark gray, crossed out |
//! | Due soon | Yellow |
//! | Overdue | Red |
//! | Hints | Dark gray |

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;

pub mod form;
pub mod help;
pub mod settings;
pub mod sidebar;
pub mod status_bar;
pub mod task_list;

pub use form::{form_text, form_title};
pub use help::help_text;
pub use settings::settings_text;
pub use sidebar::sidebar_text;
pub use status_bar::status_text;
pub use task_list::{task_list_text, welcome_text};

/// Content for a selectable list, plus where the selected row starts so the
/// caller can scroll it into view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListContent {
    /// Lines to show.
    pub text: Text<'static>,
    /// First line of the selected item.
    pub selected_line: usize,
    /// Number of lines the selected item spans.
    pub selected_height: usize,
}

/// Marker in front of the selected row.
pub(crate) const SELECTED_MARKER: &str = "▸ ";

/// Marker in front of other rows, the same width as [`SELECTED_MARKER`].
pub(crate) const UNSELECTED_MARKER: &str = "  ";

pub(crate) fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn hint_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

pub(crate) fn marker(selected: bool) -> &'static str {
    if selected {
        SELECTED_MARKER
    } else {
        UNSELECTED_MARKER
    }
}
