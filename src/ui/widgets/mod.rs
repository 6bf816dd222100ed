//! TUI widgets.

mod account_display;
mod dashboard;
mod help;
mod notifications;
mod placeholder;
mod settings_panel;
mod sidebar;
mod top_bar;

pub use account_display::{AccountDisplay, format_gbp};
pub use dashboard::Dashboard;
pub use help::HelpPanel;
pub use notifications::{render_error, render_notification};
pub use placeholder::Placeholder;
pub use settings_panel::SettingsPanel;
pub use sidebar::Sidebar;
pub use top_bar::TopBar;
