//! Configuration settings for NDL Lite.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host window configuration.
    pub host: HostConfig,
    /// Mock feed configuration.
    pub feed: FeedConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from the default location, writing defaults there on first run.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load_or_init(None)
    }

    /// Load configuration, writing the defaults out if the file doesn't exist.
    ///
    /// Failing to write the file is logged, not fatal.
    pub fn load_or_init(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);
        if config_path.exists() {
            return Self::load(Some(config_path));
        }

        let config = Self::default();
        match config.save(Some(config_path.clone())) {
            Ok(()) => tracing::info!(path = %config_path.display(), "Wrote default configuration"),
            Err(e) => tracing::warn!(
                path = %config_path.display(),
                "Could not write default configuration: {}",
                e
            ),
        }
        Ok(config)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Reject values the feed or UI cannot run with.
    pub fn validate(&self) -> crate::Result<()> {
        self.feed.validate()?;

        if self.ui.tick_rate_ms == 0 {
            return Err(crate::Error::config("ui.tick_rate_ms must be greater than zero"));
        }

        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Host window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Window title.
    pub title: String,
    /// Smallest usable terminal width in columns.
    pub min_columns: u16,
    /// Smallest usable terminal height in rows.
    pub min_rows: u16,
    /// Environment variable naming the development server URL.
    pub dev_server_env: String,
    /// Application root holding the packaged `dist` bundle.
    pub app_root: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "Nags 'N' Dogs Lite Bot".to_string(),
            min_columns: 100,
            min_rows: 30,
            dev_server_env: "NDL_DEV_SERVER_URL".to_string(),
            app_root: None,
        }
    }
}

/// Mock feed configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Timer period in milliseconds.
    pub interval_ms: u64,
    /// Chance that a tick publishes a new account record.
    pub account_update_probability: f64,
    /// Chance that a tick publishes a new connection record.
    pub connection_update_probability: f64,
    /// Seed for reproducible runs. Uses OS entropy when unset.
    pub seed: Option<u64>,
}

impl FeedConfig {
    /// Timer period.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    fn validate(&self) -> crate::Result<()> {
        if self.interval_ms == 0 {
            return Err(crate::Error::config("feed.interval_ms must be greater than zero"));
        }

        for (name, p) in [
            ("account_update_probability", self.account_update_probability),
            (
                "connection_update_probability",
                self.connection_update_probability,
            ),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(crate::Error::config(format!(
                    "feed.{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }

        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            account_update_probability: 0.3,
            connection_update_probability: 0.5,
            seed: None,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Show help hint in the status bar.
    pub show_help_hint: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            show_status_bar: true,
            show_help_hint: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/toggle.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Increase a value.
    pub increase: String,
    /// Decrease a value.
    pub decrease: String,
    /// Ask the host for fresh account and connection data.
    pub refresh: String,
    /// Switch to dashboard.
    pub dashboard: String,
    /// Switch to trading.
    pub trading: String,
    /// Switch to account.
    pub account: String,
    /// Switch to settings.
    pub settings: String,
    /// Switch to activity.
    pub activity: String,
    /// Switch to alerts.
    pub alerts: String,
    /// Next section.
    pub next_section: String,
    /// Previous section.
    pub previous_section: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            increase: "+".to_string(),
            decrease: "-".to_string(),
            refresh: "r".to_string(),
            dashboard: "1".to_string(),
            trading: "2".to_string(),
            account: "3".to_string(),
            settings: "4".to_string(),
            activity: "5".to_string(),
            alerts: "6".to_string(),
            next_section: "Tab".to_string(),
            previous_section: "BackTab".to_string(),
        }
    }
}
