//! Panel layout, focus and composition.
//!
//! The screen is split into a fixed set of panels:
//!
//! ```text
//! +-- Lists ------+-- Tasks -----------------------+
//! |               |                                |
//! |   Sidebar     |   Main                         |
//! |               |                                |
//! +---------------+--------------------------------+
//! |   Status                                       |
//! +------------------------------------------------+
//! ```
//!
//! plus two overlays, Form and Help, which are centered on the screen and
//! replace the base panels while visible. [`LayoutManager`] owns the panel
//! rectangles, their visibility and content, and which panel has focus.

use std::fmt;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

/// Narrowest sidebar on screens at least [`MIN_SCREEN_WIDTH`] wide.
pub const MIN_SIDEBAR_WIDTH: u16 = 35;

/// Widest sidebar.
pub const MAX_SIDEBAR_WIDTH: u16 = 50;

/// Smallest screen the layout is designed for.
pub const MIN_SCREEN_WIDTH: u16 = 80;

/// Smallest screen height the layout is designed for.
pub const MIN_SCREEN_HEIGHT: u16 = 24;

/// Height of the status bar.
pub const STATUS_HEIGHT: u16 = 3;

/// Height of the status bar on very short screens.
pub const COMPACT_STATUS_HEIGHT: u16 = 2;

/// Screens shorter than this get the compact status bar.
const COMPACT_SCREEN_HEIGHT: u16 = 13;

/// Default form overlay size.
pub const FORM_WIDTH: u16 = 60;
/// Default form overlay height.
pub const FORM_HEIGHT: u16 = 12;

/// Below these screen sizes the form shrinks to fit.
const FORM_SHRINK_WIDTH: u16 = 70;
const FORM_SHRINK_HEIGHT: u16 = 15;

/// Help overlay margins and the size below which it takes the whole screen.
const HELP_MARGIN_X: u16 = 6;
const HELP_MARGIN_Y: u16 = 4;
const HELP_MIN_WIDTH: u16 = 60;
const HELP_MIN_HEIGHT: u16 = 20;

/// No panel is ever laid out smaller than this.
pub const MIN_PANEL_WIDTH: u16 = 10;
/// No main, sidebar or overlay panel is ever laid out shorter than this.
pub const MIN_PANEL_HEIGHT: u16 = 5;

/// Identifies a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// Task list, settings or welcome text.
    Main,
    /// List of todo lists.
    Sidebar,
    /// Counters, hints and transient messages.
    Status,
    /// Create/edit form overlay.
    Form,
    /// Key binding overlay.
    Help,
}

impl PanelId {
    /// Every panel, in storage order.
    pub const ALL: [Self; 5] = [Self::Main, Self::Sidebar, Self::Status, Self::Form, Self::Help];

    /// Panels reachable with next/previous window.
    pub const FOCUS_RING: [Self; 3] = [Self::Main, Self::Sidebar, Self::Status];

    fn index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Sidebar => 1,
            Self::Status => 2,
            Self::Form => 3,
            Self::Help => 4,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Sidebar => "Sidebar",
            Self::Status => "Status",
            Self::Form => "Form",
            Self::Help => "Help",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Border glyphs and colors of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    /// Border glyph set.
    pub border_type: BorderType,
    /// Border and title color while focused.
    pub focused: Color,
    /// Border and title color otherwise.
    pub unfocused: Color,
}

impl PanelStyle {
    /// Style of the base panels.
    pub const BASE: Self = Self {
        border_type: BorderType::Rounded,
        focused: Color::Cyan,
        unfocused: Color::DarkGray,
    };

    /// Style of the form overlay.
    pub const FORM: Self = Self {
        border_type: BorderType::Double,
        focused: Color::Yellow,
        unfocused: Color::Yellow,
    };

    /// Style of the help overlay.
    pub const HELP: Self = Self {
        border_type: BorderType::Rounded,
        focused: Color::LightYellow,
        unfocused: Color::LightYellow,
    };

    fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.focused } else { self.unfocused })
    }

    fn title_style(&self, focused: bool) -> Style {
        let style = self.border_style(focused);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

/// One rectangular region of the screen.
#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    title: String,
    content: Text<'static>,
    rect: Rect,
    visible: bool,
    bordered: bool,
    scroll: u16,
    style: PanelStyle,
}

impl Panel {
    fn new(id: PanelId, visible: bool, style: PanelStyle) -> Self {
        Self {
            id,
            title: String::new(),
            content: Text::default(),
            rect: Rect::default(),
            visible,
            bordered: true,
            scroll: 0,
            style,
        }
    }

    /// The panel's identity.
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Title shown in the top border.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    #[must_use]
    pub fn content(&self) -> &Text<'static> {
        &self.content
    }

    /// Position and size from the last [`LayoutManager::set_screen_size`].
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the panel is drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the panel has a border.
    #[must_use]
    pub fn has_border(&self) -> bool {
        self.bordered
    }

    /// Border style.
    #[must_use]
    pub fn style(&self) -> PanelStyle {
        self.style
    }

    /// Number of body rows inside the border.
    #[must_use]
    pub fn inner_height(&self) -> u16 {
        if self.bordered {
            self.rect.height.saturating_sub(2)
        } else {
            self.rect.height
        }
    }

    fn render(&self, focused: bool, area: Rect, buf: &mut Buffer) {
        let mut paragraph = Paragraph::new(self.content.clone()).scroll((self.scroll, 0));
        if self.bordered {
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_type(self.style.border_type)
                .border_style(self.style.border_style(focused));
            if !self.title.is_empty() {
                block = block.title(Span::styled(
                    format!(" {} ", self.title),
                    self.style.title_style(focused),
                ));
            }
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

/// Owns the panels and decides where they go.
///
/// # Examples
///
/// ```
/// use lazytodo_tui::layout::{LayoutManager, PanelId};
///
/// let mut layout = LayoutManager::new();
/// layout.set_screen_size(120, 40);
///
/// let sidebar = layout.panel(PanelId::Sidebar).rect();
/// let main = layout.panel(PanelId::Main).rect();
/// assert_eq!(sidebar.width + main.width, 120);
///
/// layout.next_focus();
/// assert_eq!(layout.focused(), Some(PanelId::Sidebar));
/// ```
#[derive(Debug, Clone)]
pub struct LayoutManager {
    panels: [Panel; 5],
    focused: Option<PanelId>,
    width: u16,
    height: u16,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    /// Creates the initial layout: base panels visible, overlays hidden,
    /// Main focused, sized for an 80×24 screen.
    #[must_use]
    pub fn new() -> Self {
        let mut layout = Self {
            panels: [
                Panel::new(PanelId::Main, true, PanelStyle::BASE),
                Panel::new(PanelId::Sidebar, true, PanelStyle::BASE),
                Panel::new(PanelId::Status, true, PanelStyle::BASE),
                Panel::new(PanelId::Form, false, PanelStyle::FORM),
                Panel::new(PanelId::Help, false, PanelStyle::HELP),
            ],
            focused: Some(PanelId::Main),
            width: 0,
            height: 0,
        };
        layout.set_screen_size(MIN_SCREEN_WIDTH, MIN_SCREEN_HEIGHT);
        layout
    }

    /// Returns a panel.
    #[must_use]
    pub fn panel(&self, id: PanelId) -> &Panel {
        &self.panels[id.index()]
    }

    fn panel_mut(&mut self, id: PanelId) -> &mut Panel {
        &mut self.panels[id.index()]
    }

    /// The size passed to the last [`set_screen_size`](Self::set_screen_size).
    #[must_use]
    pub fn screen_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Recomputes every panel rectangle for a screen of the given size.
    ///
    /// The sidebar takes a third of the width, clamped to
    /// [`MIN_SIDEBAR_WIDTH`]..=[`MAX_SIDEBAR_WIDTH`], and Main takes the rest.
    /// Screens narrower than [`MIN_SCREEN_WIDTH`] relax the sidebar minimum to
    /// a third of the width. Panels never shrink below
    /// [`MIN_PANEL_WIDTH`]×[`MIN_PANEL_HEIGHT`].
    pub fn set_screen_size(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;

        let status_height = if height < COMPACT_SCREEN_HEIGHT {
            COMPACT_STATUS_HEIGHT
        } else {
            STATUS_HEIGHT
        };
        let min_sidebar = if width < MIN_SCREEN_WIDTH {
            width / 3
        } else {
            MIN_SIDEBAR_WIDTH
        };
        let sidebar_width = (width / 3)
            .clamp(min_sidebar, MAX_SIDEBAR_WIDTH)
            .max(MIN_PANEL_WIDTH);
        let main_width = width.saturating_sub(sidebar_width).max(MIN_PANEL_WIDTH);
        let body_height = height.saturating_sub(status_height).max(MIN_PANEL_HEIGHT);

        self.panel_mut(PanelId::Sidebar).rect = Rect::new(0, 0, sidebar_width, body_height);
        self.panel_mut(PanelId::Main).rect = Rect::new(sidebar_width, 0, main_width, body_height);
        self.panel_mut(PanelId::Status).rect = Rect::new(
            0,
            body_height,
            width.max(MIN_PANEL_WIDTH),
            status_height,
        );
        self.panel_mut(PanelId::Form).rect = form_rect(width, height);
        self.panel_mut(PanelId::Help).rect = help_rect(width, height);
    }

    /// The focused panel, if any.
    #[must_use]
    pub fn focused(&self) -> Option<PanelId> {
        self.focused
    }

    /// Whether `id` has focus.
    #[must_use]
    pub fn is_focused(&self, id: PanelId) -> bool {
        self.focused == Some(id)
    }

    /// Moves focus to `id` if it is visible; otherwise focus is unchanged.
    pub fn set_focus(&mut self, id: PanelId) {
        if self.panel(id).visible {
            self.focused = Some(id);
        }
    }

    /// Focuses the next visible panel of [`PanelId::FOCUS_RING`].
    pub fn next_focus(&mut self) {
        self.cycle_focus(1);
    }

    /// Focuses the previous visible panel of [`PanelId::FOCUS_RING`].
    pub fn prev_focus(&mut self) {
        self.cycle_focus(PanelId::FOCUS_RING.len() - 1);
    }

    fn cycle_focus(&mut self, step: usize) {
        let ring = PanelId::FOCUS_RING;
        let start = self
            .focused
            .and_then(|id| ring.iter().position(|&candidate| candidate == id));

        // Without a ring position, stepping forward lands on the first entry
        // and stepping back on the last.
        let origin = start.unwrap_or(if step == 1 { ring.len() - 1 } else { 0 });
        self.focused = (1..=ring.len())
            .map(|offset| ring[(origin + offset * step) % ring.len()])
            .find(|&id| self.panel(id).visible);
    }

    /// Shows or hides a panel. Hiding the focused panel clears focus.
    pub fn set_visible(&mut self, id: PanelId, visible: bool) {
        self.panel_mut(id).visible = visible;
        if !visible && self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Replaces a panel's body.
    pub fn set_content(&mut self, id: PanelId, content: impl Into<Text<'static>>) {
        self.panel_mut(id).content = content.into();
    }

    /// Replaces a panel's title.
    pub fn set_title(&mut self, id: PanelId, title: impl Into<String>) {
        self.panel_mut(id).title = title.into();
    }

    /// Turns a panel's border on or off.
    pub fn set_border(&mut self, id: PanelId, bordered: bool) {
        self.panel_mut(id).bordered = bordered;
    }

    /// Sets how many body rows are scrolled out of view.
    pub fn set_scroll(&mut self, id: PanelId, rows: u16) {
        self.panel_mut(id).scroll = rows;
    }

    /// The overlay drawn instead of the base panels, if any. The form wins
    /// when both overlays are visible.
    #[must_use]
    pub fn active_overlay(&self) -> Option<PanelId> {
        [PanelId::Form, PanelId::Help]
            .into_iter()
            .find(|&id| self.panel(id).visible)
    }

    /// Draws the visible panels into `buf`.
    ///
    /// With an overlay visible only the overlay is drawn, centered on an
    /// otherwise blank screen. Panels are clipped to the buffer.
    pub fn render(&self, buf: &mut Buffer) {
        if let Some(overlay) = self.active_overlay() {
            Clear.render(buf.area, buf);
            self.render_panel(overlay, buf);
            return;
        }
        for id in [PanelId::Sidebar, PanelId::Main, PanelId::Status] {
            if self.panel(id).visible {
                self.render_panel(id, buf);
            }
        }
    }

    fn render_panel(&self, id: PanelId, buf: &mut Buffer) {
        let panel = self.panel(id);
        let area = panel.rect.intersection(buf.area);
        if !area.is_empty() {
            panel.render(self.is_focused(id), area, buf);
        }
    }
}

fn form_rect(width: u16, height: u16) -> Rect {
    let form_width = if width < FORM_SHRINK_WIDTH {
        width.saturating_sub(4)
    } else {
        FORM_WIDTH
    };
    let form_height = if height < FORM_SHRINK_HEIGHT {
        height.saturating_sub(3)
    } else {
        FORM_HEIGHT
    };
    centered_rect(form_width, form_height, width, height)
}

fn help_rect(width: u16, height: u16) -> Rect {
    let mut help_width = width.saturating_sub(HELP_MARGIN_X);
    if help_width < HELP_MIN_WIDTH {
        help_width = width;
    }
    let mut help_height = height.saturating_sub(HELP_MARGIN_Y);
    if help_height < HELP_MIN_HEIGHT {
        help_height = height;
    }
    centered_rect(help_width, help_height, width, height)
}

/// Centers a panel of at least the minimum size on the screen.
fn centered_rect(width: u16, height: u16, screen_width: u16, screen_height: u16) -> Rect {
    let width = width.max(MIN_PANEL_WIDTH);
    let height = height.max(MIN_PANEL_HEIGHT);
    Rect::new(
        screen_width.saturating_sub(width) / 2,
        screen_height.saturating_sub(height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn layout(width: u16, height: u16) -> LayoutManager {
        let mut layout = LayoutManager::new();
        layout.set_screen_size(width, height);
        layout
    }

    #[test]
    fn minimum_screen_split() {
        let layout = layout(80, 24);
        let sidebar = layout.panel(PanelId::Sidebar).rect();
        let main = layout.panel(PanelId::Main).rect();
        let status = layout.panel(PanelId::Status).rect();

        assert!((MIN_SIDEBAR_WIDTH..=MAX_SIDEBAR_WIDTH).contains(&sidebar.width));
        assert_eq!(main.width, 80 - sidebar.width);
        assert_eq!(main.x, sidebar.width);
        assert!(status.height == 2 || status.height == 3);
        assert_eq!(status.y, 24 - status.height);
        assert_eq!(sidebar.height, main.height);
    }

    #[test]
    fn wide_screen_caps_sidebar() {
        let layout = layout(240, 60);
        assert_eq!(layout.panel(PanelId::Sidebar).rect().width, MAX_SIDEBAR_WIDTH);
        assert_eq!(layout.panel(PanelId::Main).rect().width, 190);
    }

    #[test]
    fn short_screen_uses_compact_status() {
        let layout = layout(80, 12);
        assert_eq!(layout.panel(PanelId::Status).rect().height, COMPACT_STATUS_HEIGHT);
    }

    #[test]
    fn form_overlay_is_centered() {
        let layout = layout(80, 24);
        assert_eq!(layout.panel(PanelId::Form).rect(), Rect::new(10, 6, 60, 12));
    }

    #[test]
    fn help_overlay_fills_small_screens() {
        let roomy = layout(100, 30);
        assert_eq!(roomy.panel(PanelId::Help).rect(), Rect::new(3, 2, 94, 26));

        let tight = layout(80, 22);
        assert_eq!(tight.panel(PanelId::Help).rect(), Rect::new(3, 0, 74, 22));
    }

    #[test]
    fn focus_ring_returns_to_main_after_three_steps() {
        let mut layout = LayoutManager::new();
        assert_eq!(layout.focused(), Some(PanelId::Main));

        layout.next_focus();
        assert_eq!(layout.focused(), Some(PanelId::Sidebar));
        layout.next_focus();
        assert_eq!(layout.focused(), Some(PanelId::Status));
        layout.next_focus();
        assert_eq!(layout.focused(), Some(PanelId::Main));
    }

    #[test]
    fn prev_focus_walks_backwards() {
        let mut layout = LayoutManager::new();
        layout.prev_focus();
        assert_eq!(layout.focused(), Some(PanelId::Status));
        layout.prev_focus();
        assert_eq!(layout.focused(), Some(PanelId::Sidebar));
    }

    #[test]
    fn cycling_skips_hidden_panels() {
        let mut layout = LayoutManager::new();
        layout.set_visible(PanelId::Sidebar, false);
        layout.next_focus();
        assert_eq!(layout.focused(), Some(PanelId::Status));
    }

    #[test]
    fn cycling_with_nothing_visible_clears_focus() {
        let mut layout = LayoutManager::new();
        for id in PanelId::FOCUS_RING {
            layout.set_visible(id, false);
        }
        layout.next_focus();
        assert_eq!(layout.focused(), None);
    }

    #[test]
    fn cycling_from_an_overlay_enters_the_ring() {
        let mut layout = LayoutManager::new();
        layout.set_visible(PanelId::Form, true);
        layout.set_focus(PanelId::Form);
        layout.next_focus();
        assert_eq!(layout.focused(), Some(PanelId::Main));
    }

    #[test]
    fn focusing_a_hidden_panel_is_a_no_op() {
        let mut layout = LayoutManager::new();
        layout.set_focus(PanelId::Help);
        assert_eq!(layout.focused(), Some(PanelId::Main));

        layout.set_visible(PanelId::Help, true);
        layout.set_focus(PanelId::Help);
        assert_eq!(layout.focused(), Some(PanelId::Help));
        assert!(!layout.is_focused(PanelId::Main));
    }

    #[test]
    fn hiding_the_focused_panel_clears_focus() {
        let mut layout = LayoutManager::new();
        layout.set_visible(PanelId::Main, false);
        assert_eq!(layout.focused(), None);
    }

    #[test]
    fn setters_touch_only_their_panel() {
        let mut layout = LayoutManager::new();
        layout.set_title(PanelId::Main, "Groceries");
        layout.set_content(PanelId::Main, "milk");
        layout.set_border(PanelId::Status, false);

        assert_eq!(layout.panel(PanelId::Main).title(), "Groceries");
        assert_eq!(layout.panel(PanelId::Sidebar).title(), "");
        assert_eq!(layout.panel(PanelId::Main).content().lines.len(), 1);
        assert!(!layout.panel(PanelId::Status).has_border());
        assert!(layout.panel(PanelId::Main).has_border());
    }

    #[test]
    fn render_composes_base_panels() {
        let mut layout = layout(80, 24);
        layout.set_title(PanelId::Sidebar, "Lists");
        layout.set_title(PanelId::Main, "Tasks");
        layout.set_content(PanelId::Status, "Lists: 0");

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        layout.render(&mut buf);
        let output = buffer_to_string(&buf);

        assert!(output.contains(" Lists "));
        assert!(output.contains(" Tasks "));
        assert!(output.contains("Lists: 0"));
    }

    #[test]
    fn overlay_replaces_base_panels() {
        let mut layout = layout(80, 24);
        layout.set_title(PanelId::Sidebar, "Lists");
        layout.set_title(PanelId::Form, "New List");
        layout.set_visible(PanelId::Form, true);

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        layout.render(&mut buf);
        let output = buffer_to_string(&buf);

        assert!(output.contains("New List"));
        assert!(!output.contains(" Lists "));
    }

    #[test]
    fn form_takes_precedence_over_help() {
        let mut layout = LayoutManager::new();
        layout.set_visible(PanelId::Help, true);
        assert_eq!(layout.active_overlay(), Some(PanelId::Help));
        layout.set_visible(PanelId::Form, true);
        assert_eq!(layout.active_overlay(), Some(PanelId::Form));
    }

    #[test]
    fn render_is_clipped_to_a_small_buffer() {
        let layout = layout(20, 6);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 6));
        // Panels are larger than the screen here; rendering must not panic.
        layout.render(&mut buf);
    }

    proptest! {
        #[test]
        fn panels_always_have_usable_size(width in 0u16..400, height in 0u16..200) {
            let layout = layout(width, height);
            for id in PanelId::ALL {
                let rect = layout.panel(id).rect();
                prop_assert!(rect.width >= MIN_PANEL_WIDTH);
                prop_assert!(rect.height >= COMPACT_STATUS_HEIGHT);
            }
            for id in [PanelId::Main, PanelId::Sidebar, PanelId::Form, PanelId::Help] {
                prop_assert!(layout.panel(id).rect().height >= MIN_PANEL_HEIGHT);
            }
        }

        #[test]
        fn sidebar_and_main_share_the_width(width in MIN_SCREEN_WIDTH..400, height in MIN_SCREEN_HEIGHT..200) {
            let layout = layout(width, height);
            let sidebar = layout.panel(PanelId::Sidebar).rect().width;
            prop_assert!((MIN_SIDEBAR_WIDTH..=MAX_SIDEBAR_WIDTH).contains(&sidebar));
            prop_assert_eq!(sidebar + layout.panel(PanelId::Main).rect().width, width);
        }
    }
}
