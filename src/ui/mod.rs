//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::{Layout, centered_rect};
pub use widgets::{
    AccountDisplay, Dashboard, HelpPanel, Placeholder, SettingsPanel, Sidebar, TopBar, format_gbp,
};

use crate::config::{KeyBindings, UiConfig};
use crate::state::{Section, Store, Theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout as RatatuiLayout},
    style::Color,
};

/// Colours derived from the selected theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Borders, titles and the selection cursor.
    pub accent: Color,
    /// Group headings and secondary borders.
    pub highlight: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::NeonDark => Self {
                accent: Color::Cyan,
                highlight: Color::Magenta,
            },
            Theme::Dark => Self {
                accent: Color::Blue,
                highlight: Color::Gray,
            },
        }
    }
}

/// Main UI renderer.
pub struct Ui {
    config: UiConfig,
    keybindings: KeyBindings,
}

impl Ui {
    pub fn new(config: UiConfig, keybindings: KeyBindings) -> Self {
        Self {
            config,
            keybindings,
        }
    }

    /// Render the entire UI.
    pub fn render(&self, frame: &mut Frame, store: &Store) {
        let palette = Palette::for_theme(store.settings.settings.theme);
        let layout = Layout::new(frame.area(), self.config.show_status_bar);

        if self.config.show_status_bar {
            TopBar::render(
                frame,
                layout.top_area,
                store,
                &palette,
                self.config.show_help_hint,
            );
        }
        Sidebar::render(frame, layout.sidebar_area, store, &palette);

        // Render main content based on current section
        let section = store.app.current_section;
        match section {
            Section::Dashboard => Dashboard::render(frame, layout.main_area, store, &palette),
            Section::Account => {
                let rows = RatatuiLayout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(layout.main_area);
                AccountDisplay::render(frame, rows[0], &store.account, &palette);
                AccountDisplay::render_details(frame, rows[1], &store.account, &palette);
            }
            Section::Settings => {
                SettingsPanel::render(frame, layout.main_area, &store.settings, &palette);
            }
            Section::Trading | Section::Activity | Section::Alerts => {
                Placeholder::render(frame, layout.main_area, section, &palette);
            }
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &self.keybindings);
        }

        // Errors take precedence over notifications
        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.notification_area, error);
        } else if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}
