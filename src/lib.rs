//! # NDL Lite - Nags 'N' Dogs Lite Bot
//!
//! A terminal front-end shell for a sports-trading bot. Account and
//! connection data come from a mock feed that publishes randomized
//! snapshots on a timer, so the UI can be developed without a live
//! exchange.
//!
//! ## Architecture
//!
//! - **App**: Core application lifecycle, wiring feed, host and UI together
//! - **Feed**: Mock data provider with pluggable randomness, clock and timer
//! - **Host**: Terminal window, request handlers and startup notification
//! - **State**: Centralized state management
//! - **UI**: Layout and rendering logic
//! - **Events**: Input handling and key bindings
//! - **Config**: Configuration management

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod host;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{AccountRecord, ConnectionRecord, MockDataProvider};
