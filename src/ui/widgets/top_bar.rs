//! Top bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::host::ContentSource;
use crate::state::Store;
use crate::ui::Palette;

/// Top bar showing connection and host details.
pub struct TopBar;

impl TopBar {
    /// Render the top bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, palette: &Palette, help_hint: bool) {
        let connection = if store.connection.loading {
            Span::styled("◌ Connecting", Style::default().fg(Color::Yellow))
        } else if store.connection.is_connected() {
            Span::styled("● Connected", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Disconnected", Style::default().fg(Color::Red))
        };

        let mut left = vec![
            Span::styled(
                " NDL Lite ",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            connection,
        ];

        if let Some(latency) = store.connection.latency_ms() {
            left.push(Span::styled(
                format!(" {}ms", latency),
                Style::default().fg(Color::Gray),
            ));
        }
        if let Some(source) = &store.app.content_source {
            left.push(Span::raw(" | "));
            left.extend(content_spans(source));
        }
        if let Some(version) = &store.app.version {
            left.push(Span::raw(" | "));
            left.push(Span::styled(
                format!("v{}", version),
                Style::default().fg(Color::Gray),
            ));
        }
        if store.app.loading {
            left.push(Span::styled(
                " Loading... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        let hint = if help_hint {
            Span::styled(" Press ? for help ", Style::default().fg(Color::Gray))
        } else {
            Span::raw("")
        };

        // Right-align the help hint
        let left_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
        let padding = (area.width as usize).saturating_sub(left_len + hint.content.len());
        left.push(Span::raw(" ".repeat(padding)));
        left.push(hint);

        let paragraph = Paragraph::new(Line::from(left)).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(paragraph, area);
    }
}

/// Badge plus location of the presentation content.
fn content_spans(source: &ContentSource) -> [Span<'static>; 2] {
    match source {
        ContentSource::DevServer(url) => [
            Span::styled(
                "DEV ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(url.clone(), Style::default().fg(Color::Gray)),
        ],
        ContentSource::Bundle(path) => [
            Span::styled("bundle ", Style::default().fg(Color::Gray)),
            Span::styled(path.display().to_string(), Style::default().fg(Color::Gray)),
        ],
    }
}
