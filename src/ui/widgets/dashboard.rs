//! Dashboard view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::AccountDisplay;
use crate::state::Store;
use crate::ui::Palette;

/// Trend of a headline figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trend {
    Positive,
    Neutral,
    Negative,
}

impl Trend {
    fn color(self) -> Color {
        match self {
            Self::Positive => Color::Green,
            Self::Neutral => Color::Gray,
            Self::Negative => Color::Red,
        }
    }
}

/// Headline figures. Static until live trading lands.
const STATS: [(&str, &str, &str, Trend); 4] = [
    ("Today's P&L", "+£127.50", "+12.4%", Trend::Positive),
    ("Active Positions", "3", "+2 from yesterday", Trend::Neutral),
    ("Win Rate", "68.2%", "+2.1%", Trend::Positive),
    ("Total Volume", "£2,450", "-5.2%", Trend::Negative),
];

/// Dashboard widget.
pub struct Dashboard;

impl Dashboard {
    /// Render the dashboard.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Stats
                Constraint::Length(3), // Account
                Constraint::Min(0),
            ])
            .split(area);

        Self::render_header(frame, rows[0], store, palette);
        Self::render_stats(frame, rows[1], palette);
        AccountDisplay::render(frame, rows[2], &store.account, palette);
    }

    fn render_header(frame: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let mut status = if store.connection.is_connected() {
            vec![Span::styled("● Live", Style::default().fg(Color::Green))]
        } else {
            vec![Span::styled("○ Offline", Style::default().fg(Color::Red))]
        };
        if let Some(latency) = store.connection.latency_ms() {
            status.push(Span::styled(
                format!("  {}ms", latency),
                Style::default().fg(Color::Gray),
            ));
        }

        let mut spans = vec![
            Span::styled(
                "Trading Dashboard",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ];
        spans.extend(status);

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }

    fn render_stats(frame: &mut Frame, area: Rect, palette: &Palette) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for ((name, value, change, trend), column) in STATS.iter().zip(columns.iter()) {
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    *value,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*change, Style::default().fg(trend.color()))),
            ])
            .block(
                Block::default()
                    .title(format!(" {} ", name))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.highlight)),
            );
            frame.render_widget(card, *column);
        }
    }
}
