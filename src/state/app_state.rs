//! Application-level state.

use super::Notification;
use crate::host::ContentSource;

/// The current section/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Trading,
    Account,
    Settings,
    Activity,
    Alerts,
}

impl Section {
    /// Sections in sidebar order.
    pub const ALL: [Section; 6] = [
        Self::Dashboard,
        Self::Trading,
        Self::Account,
        Self::Settings,
        Self::Activity,
        Self::Alerts,
    ];

    /// Sidebar label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Trading => "Trading",
            Self::Account => "Account",
            Self::Settings => "Settings",
            Self::Activity => "Activity",
            Self::Alerts => "Alerts",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// The next section, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous section, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current section.
    pub current_section: Section,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Current error message.
    pub error: Option<String>,
    /// Whether the app is loading data.
    pub loading: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Host application version.
    pub version: Option<String>,
    /// Where the presentation content is served from.
    pub content_source: Option<ContentSource>,
    /// Startup message pushed by the host.
    pub startup_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_cycle_wraps() {
        assert_eq!(Section::Dashboard.next(), Section::Trading);
        assert_eq!(Section::Alerts.next(), Section::Dashboard);
        assert_eq!(Section::Dashboard.previous(), Section::Alerts);
        assert_eq!(Section::Settings.previous(), Section::Account);
    }
}
