//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Sidebar width in cells.
const SIDEBAR_WIDTH: u16 = 24;
/// Notification popup size in cells.
const NOTIFICATION_WIDTH: u16 = 48;
const NOTIFICATION_HEIGHT: u16 = 3;

/// UI layout areas.
pub struct Layout {
    /// Top bar area.
    pub top_area: Rect,
    /// Section navigation.
    pub sidebar_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Notification area (overlaid, bottom right).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_top_bar: bool) -> Self {
        let top_height = if show_top_bar { 1 } else { 0 };
        let rows = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(top_height), Constraint::Min(0)])
            .split(area);

        let columns = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[1]);

        let width = NOTIFICATION_WIDTH.min(area.width);
        let height = NOTIFICATION_HEIGHT.min(area.height);
        let notification_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: area.y + area.height.saturating_sub(height + 1),
            width,
            height,
        };

        Self {
            top_area: rows[0],
            sidebar_area: columns[0],
            main_area: columns[1],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
