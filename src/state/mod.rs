//! State management for NDL Lite.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture.

mod account_state;
mod app_state;
mod connection_state;
mod settings_state;

pub use account_state::AccountState;
pub use app_state::{AppState, Section};
pub use connection_state::ConnectionState;
pub use settings_state::{
    NotificationToggles, NotificationsPatch, RefreshInterval, RiskLimits, RiskLimitsPatch,
    SettingField, SettingGroup, SettingValue, Settings, SettingsPatch, SettingsState, Theme,
};

use crate::error::Result;
use crate::feed::{AccountRecord, ConnectionRecord};
use crate::host::{ContentSource, HostEvent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::mpsc;

/// Step applied when adjusting a risk limit.
pub const RISK_LIMIT_STEP: Decimal = dec!(1.00);

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetSection(Section),
    NextSection,
    PreviousSection,

    // Feed updates
    AccountUpdated(AccountRecord),
    ConnectionUpdated(ConnectionRecord),

    // Settings
    UpdateSettings(SettingsPatch),
    ActivateSetting,
    IncreaseSetting,
    DecreaseSetting,

    // Host
    HostMessage(HostEvent),
    SetVersion(String),
    SetContentSource(ContentSource),

    // UI actions
    ScrollUp,
    ScrollDown,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Data refresh
    RefreshAll,

    // Error handling
    SetError(String),
    ClearError,
    SetLoading(bool),

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Account state.
    pub account: AccountState,
    /// Connection state.
    pub connection: ConnectionState,
    /// Settings state.
    pub settings: SettingsState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            account: AccountState {
                loading: true,
                ..Default::default()
            },
            connection: ConnectionState {
                loading: true,
                ..Default::default()
            },
            settings: SettingsState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetSection(section) => self.app.current_section = section,
            Action::NextSection => self.app.current_section = self.app.current_section.next(),
            Action::PreviousSection => {
                self.app.current_section = self.app.current_section.previous();
            }

            // Feed updates
            Action::AccountUpdated(record) => self.account.update(record),
            Action::ConnectionUpdated(record) => {
                let dropped = self.connection.is_connected() && !record.connected;
                self.connection.update(record);
                if dropped && self.settings.settings.notifications.system_alerts {
                    self.app.notification = Some(Notification::warning("Connection lost"));
                }
            }

            // Settings
            Action::UpdateSettings(patch) => self.settings.settings.apply(patch),
            Action::ActivateSetting => {
                let field = self.settings.selected_field();
                if let Some(patch) = field.activate(&self.settings.settings) {
                    self.settings.settings.apply(patch);
                }
            }
            Action::IncreaseSetting => self.adjust_setting(RISK_LIMIT_STEP),
            Action::DecreaseSetting => self.adjust_setting(-RISK_LIMIT_STEP),

            // Host
            Action::HostMessage(event) => match event {
                HostEvent::MainProcessMessage(message) => {
                    self.app.notification =
                        Some(Notification::info(format!("Window loaded at {}", message)));
                    self.app.startup_message = Some(message);
                }
            },
            Action::SetVersion(version) => self.app.version = Some(version),
            Action::SetContentSource(source) => self.app.content_source = Some(source),

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Data refresh
            Action::RefreshAll => {
                self.app.loading = true;
            }

            // Error handling
            Action::SetError(error) => {
                self.app.error = Some(error);
                self.app.loading = false;
            }
            Action::ClearError => {
                self.app.error = None;
            }
            Action::SetLoading(loading) => {
                self.app.loading = loading;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    fn scroll(&mut self, delta: i32) {
        if self.app.current_section == Section::Settings {
            self.settings.move_selection(delta);
        }
    }

    fn adjust_setting(&mut self, delta: Decimal) {
        if self.app.current_section != Section::Settings {
            return;
        }
        let field = self.settings.selected_field();
        if let Some(patch) = field.adjust(&self.settings.settings, delta) {
            self.settings.settings.apply(patch);
        }
    }
}
