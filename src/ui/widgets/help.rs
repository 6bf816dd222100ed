//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::config::KeyBindings;
use crate::ui::layout::centered_rect;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let sections = [
            (
                "Sections",
                vec![
                    (
                        format!("{}-{}", keys.dashboard, keys.alerts),
                        "Jump to section",
                    ),
                    (
                        format!("{}/{}", keys.next_section, keys.previous_section),
                        "Next/previous section",
                    ),
                ],
            ),
            (
                "Settings",
                vec![
                    (format!("{}/{}", keys.down, keys.up), "Move down/up"),
                    (format!("{}/Space", keys.select), "Toggle or cycle"),
                    (
                        format!("{}/{}", keys.increase, keys.decrease),
                        "Adjust risk limit",
                    ),
                ],
            ),
            (
                "General",
                vec![
                    (keys.refresh.clone(), "Refresh from host"),
                    (keys.back.clone(), "Dismiss notification"),
                    (keys.help.clone(), "Toggle help"),
                    (keys.quit.clone(), "Quit"),
                ],
            ),
        ];

        let mut help_text = Vec::new();
        for (heading, entries) in sections {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, description) in entries {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {:<14}", key), Style::default().fg(Color::Cyan)),
                    Span::raw(description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
