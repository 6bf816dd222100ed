//! Sections that are not built yet.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::Section;
use crate::ui::Palette;

const PLANNED_FEATURES: [(&str, &str); 4] = [
    (
        "Market Data Matrix",
        "Real-time odds monitoring and analysis across multiple markets",
    ),
    (
        "Trading Strategies",
        "Automated betting strategies with customizable parameters",
    ),
    (
        "Bet Placement Engine",
        "High-speed automated bet placement and management",
    ),
    (
        "Real-time Monitoring",
        "Live tracking of positions, P&L, and market movements",
    ),
];

/// Placeholder for Trading, Activity and Alerts.
pub struct Placeholder;

impl Placeholder {
    /// Render the placeholder for `section`.
    pub fn render(frame: &mut Frame, area: Rect, section: Section, palette: &Palette) {
        let heading = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::Gray);

        let lines = if section == Section::Trading {
            let mut lines = vec![
                Line::from(Span::styled("Trading Automation Hub", heading)),
                Line::from(""),
                Line::from(Span::styled(
                    "Advanced trading strategies and market analysis tools will be \
                     available in Phase 2.",
                    muted,
                )),
                Line::from(""),
            ];
            for (title, description) in PLANNED_FEATURES {
                lines.push(Line::from(vec![
                    Span::styled("• ", Style::default().fg(palette.highlight)),
                    Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled("  Phase 2", Style::default().fg(Color::Yellow)),
                ]));
                lines.push(Line::from(Span::styled(format!("  {}", description), muted)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Mock data providers will be replaced with live exchange connections.",
                Style::default().fg(Color::DarkGray),
            )));
            lines
        } else {
            vec![
                Line::from(Span::styled(section.title(), heading)),
                Line::from(""),
                Line::from(Span::styled(
                    "This section will be implemented in Phase 2.",
                    muted,
                )),
            ]
        };

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(format!(" {} ", section.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );
        frame.render_widget(paragraph, area);
    }
}
