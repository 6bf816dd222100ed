//! The host shell.
//!
//! Owns the terminal window, serves the request handlers the presentation
//! layer calls, and relays the startup notification.

mod content;
mod handlers;
mod window;

pub use content::{BUNDLE_DIR, ContentSource};
pub use handlers::{
    GET_ACCOUNT_INFO, GET_APP_VERSION, GET_CONNECTION_STATUS, HostApi, MAIN_PROCESS_MESSAGE,
    MockHost,
};
pub use window::{LoadTracker, Window, startup_message};

/// Notifications pushed from the host to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Sent once when the window finishes its initial load.
    MainProcessMessage(String),
}

impl HostEvent {
    /// The push channel this event travels on.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::MainProcessMessage(_) => MAIN_PROCESS_MESSAGE,
        }
    }
}
