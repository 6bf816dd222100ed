//! Section navigation sidebar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{Section, Store};
use crate::ui::Palette;

/// Sidebar widget.
pub struct Sidebar;

impl Sidebar {
    /// Render the sidebar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let mut lines = vec![
            Line::from(Span::styled(
                " Nags 'N' Dogs",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Lite Bot",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for (index, section) in Section::ALL.iter().enumerate() {
            let selected = store.app.current_section == *section;

            let marker = if selected { "▌" } else { " " };
            let name_style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(palette.accent)),
                Span::styled(
                    format!("{} ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(section.title(), name_style),
            ];
            if matches!(section, Section::Activity | Section::Alerts) {
                spans.push(Span::styled(
                    " Phase 2",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }

        // Pin the environment note to the bottom.
        let used = lines.len() as u16 + 3;
        for _ in 0..area.height.saturating_sub(used) {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            " Phase 1 - Dev",
            Style::default().fg(Color::DarkGray),
        )));

        let sidebar = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        frame.render_widget(sidebar, area);
    }
}
