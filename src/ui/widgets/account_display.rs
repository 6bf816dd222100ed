//! Account summary widget.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::feed::AccountStatus;
use crate::state::AccountState;
use crate::ui::Palette;

/// Format an amount as pounds sterling, e.g. `£1,234.56` or `-£12.00`.
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}£{}.{}", sign, grouped, fraction)
}

/// Red only when the displayed amount is below zero.
fn available_color(available: Decimal) -> Color {
    let shown = available.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if shown < Decimal::ZERO {
        Color::Red
    } else {
        Color::Green
    }
}

fn status_color(status: AccountStatus) -> Color {
    match status {
        AccountStatus::Active => Color::Green,
        AccountStatus::Suspended => Color::Yellow,
        AccountStatus::Closed => Color::Red,
    }
}

/// Balance, exposure, available funds and status cards.
pub struct AccountDisplay;

impl AccountDisplay {
    /// Render the four summary cards.
    pub fn render(frame: &mut Frame, area: Rect, account: &AccountState, palette: &Palette) {
        let record = match (&account.record, account.loading) {
            (Some(record), false) => record,
            _ => {
                let loading = Paragraph::new(Line::from(Span::styled(
                    "Loading account...",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )))
                .block(Self::card(" Account ", palette.accent));
                frame.render_widget(loading, area);
                return;
            }
        };

        let available = record.available();
        let cards = [
            (
                " Account Balance ",
                format_gbp(record.balance),
                Color::White,
            ),
            (
                " Current Exposure ",
                format_gbp(record.exposure),
                Color::Yellow,
            ),
            (
                " Available Funds ",
                format_gbp(available),
                available_color(available),
            ),
            (
                " Account Status ",
                record.status.to_string(),
                status_color(record.status),
            ),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for ((title, value, color), column) in cards.into_iter().zip(columns.iter()) {
            let card = Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .block(Self::card(title, palette.accent));
            frame.render_widget(card, *column);
        }
    }

    /// Render the account identity and feed details.
    pub fn render_details(frame: &mut Frame, area: Rect, account: &AccountState, palette: &Palette) {
        let label = Style::default().fg(Color::DarkGray);
        let lines = match &account.record {
            Some(record) => vec![
                Line::from(vec![
                    Span::styled("Account ID    ", label),
                    Span::raw(record.account_id.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Currency      ", label),
                    Span::raw(record.currency.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Trading       ", label),
                    if record.is_active() {
                        Span::styled("Enabled", Style::default().fg(Color::Green))
                    } else {
                        Span::styled("Disabled", Style::default().fg(Color::Red))
                    },
                ]),
                Line::from(vec![
                    Span::styled("Last updated  ", label),
                    Span::raw(
                        account
                            .last_updated
                            .map(|at| {
                                at.with_timezone(&chrono::Local)
                                    .format("%H:%M:%S")
                                    .to_string()
                            })
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Updates       ", label),
                    Span::raw(account.updates.to_string()),
                ]),
            ],
            None => vec![Line::from(Span::styled("No account data yet", label))],
        };

        let details = Paragraph::new(lines).block(Self::card(" Account Details ", palette.accent));
        frame.render_widget(details, area);
    }

    fn card(title: &str, border: Color) -> Block<'_> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_gbp_groups_thousands() {
        assert_eq!(format_gbp(dec!(1234.56)), "£1,234.56");
        assert_eq!(format_gbp(dec!(1234567.8)), "£1,234,567.80");
        assert_eq!(format_gbp(dec!(999.99)), "£999.99");
        assert_eq!(format_gbp(dec!(0)), "£0.00");
    }

    #[test]
    fn test_format_gbp_negative_and_rounding() {
        assert_eq!(format_gbp(dec!(-12)), "-£12.00");
        assert_eq!(format_gbp(dec!(-1500.255)), "-£1,500.26");
        assert_eq!(format_gbp(dec!(-0.001)), "£0.00");
        assert_eq!(format_gbp(dec!(100.005)), "£100.01");
    }

    #[test]
    fn test_available_color_follows_displayed_sign() {
        assert_eq!(available_color(dec!(25.00)), Color::Green);
        assert_eq!(available_color(dec!(0)), Color::Green);
        assert_eq!(available_color(dec!(-0.01)), Color::Red);
        assert_eq!(available_color(dec!(-0.001)), Color::Green);

        let mut negative_zero = Decimal::ZERO;
        negative_zero.set_sign_negative(true);
        assert!(negative_zero.is_sign_negative());
        assert_eq!(available_color(negative_zero), Color::Green);
        assert_eq!(format_gbp(negative_zero), "£0.00");
    }
}
