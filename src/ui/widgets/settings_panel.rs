//! Global settings editor.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::format_gbp;
use crate::state::{SettingField, SettingValue, SettingsState};
use crate::ui::Palette;

/// Settings panel widget.
pub struct SettingsPanel;

impl SettingsPanel {
    /// Render the settings list with the cursor.
    pub fn render(frame: &mut Frame, area: Rect, state: &SettingsState, palette: &Palette) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let settings = &state.settings;
        let selected = state.selected_field();

        let mut lines = Vec::new();
        let mut group = None;
        for field in SettingField::ALL {
            if group != Some(field.group()) {
                if group.is_some() {
                    lines.push(Line::from(""));
                }
                group = Some(field.group());
                lines.push(Line::from(Span::styled(
                    field.group().title(),
                    Style::default()
                        .fg(palette.highlight)
                        .add_modifier(Modifier::BOLD),
                )));
            }

            let is_selected = field == selected;
            let disabled = field.is_disabled(settings);

            let label_style = match (is_selected, disabled) {
                (_, true) => Style::default().fg(Color::DarkGray),
                (true, false) => Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
                (false, false) => Style::default().fg(Color::White),
            };

            let mut spans = vec![
                Span::styled(
                    if is_selected { " ▶ " } else { "   " },
                    Style::default().fg(palette.accent),
                ),
                Span::styled(format!("{:<20}", field.label()), label_style),
                Self::value_span(field.value(settings), disabled),
            ];
            if disabled {
                spans.push(Span::styled(
                    "  (auto refresh off)",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }

        let list = Paragraph::new(lines).block(
            Block::default()
                .title(" Global Settings ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );
        frame.render_widget(list, rows[0]);

        let hint = match selected.value(settings) {
            SettingValue::Amount(_) => "+/- adjust by £1.00",
            SettingValue::Choice(_) => "Enter cycles",
            SettingValue::Toggle(_) => "Enter toggles",
        };
        let footer = Paragraph::new(Line::from(vec![
            Span::raw(selected.description()),
            Span::styled(format!("  ({})", hint), Style::default().fg(Color::DarkGray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(footer, rows[1]);
    }

    fn value_span(value: SettingValue, disabled: bool) -> Span<'static> {
        let (text, color) = match value {
            SettingValue::Toggle(true) => ("[x] On".to_string(), Color::Green),
            SettingValue::Toggle(false) => ("[ ] Off".to_string(), Color::Gray),
            SettingValue::Choice(choice) => (format!("‹ {} ›", choice), Color::Cyan),
            SettingValue::Amount(amount) => (format_gbp(amount), Color::Yellow),
        };
        let color = if disabled { Color::DarkGray } else { color };
        Span::styled(text, Style::default().fg(color))
    }
}
