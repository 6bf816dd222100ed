//! The terminal window hosting the UI.

use crate::config::{HostConfig, UiConfig};
use crate::error::{Error, Result};

use chrono::{DateTime, Local};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};

/// Human-readable startup message sent once the first frame is drawn.
pub fn startup_message(at: DateTime<Local>) -> String {
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Tracks whether the initial load has finished.
#[derive(Debug, Default)]
pub struct LoadTracker {
    loaded: bool,
}

impl LoadTracker {
    /// Record a completed frame. Returns `true` only for the first one.
    pub fn frame_drawn(&mut self) -> bool {
        !std::mem::replace(&mut self.loaded, true)
    }
}

/// Run `restore` if `result` is an error, then pass it through.
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

/// Full-screen terminal window.
pub struct Window {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    load: LoadTracker,
    mouse_capture: bool,
}

impl Window {
    /// Take over the terminal.
    ///
    /// Leaves the terminal as it was if setup fails part way.
    pub fn create(host: &HostConfig, ui: &UiConfig) -> Result<Self> {
        enable_raw_mode()?;
        let terminal = restore_on_error(Self::enter(host, ui.mouse_support), || {
            let mut stdout = io::stdout();
            let _ = disable_raw_mode();
            if ui.mouse_support {
                let _ = execute!(stdout, DisableMouseCapture);
            }
            let _ = execute!(stdout, LeaveAlternateScreen);
        })?;

        tracing::info!(title = %host.title, "Window created");

        Ok(Self {
            terminal,
            load: LoadTracker::default(),
            mouse_capture: ui.mouse_support,
        })
    }

    fn enter(
        host: &HostConfig,
        mouse_support: bool,
    ) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, SetTitle(&host.title))?;
        if mouse_support {
            execute!(stdout, EnableMouseCapture)?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let size = terminal
            .size()
            .map_err(|e| Error::terminal(format!("Could not read terminal size: {}", e)))?;
        if size.width < host.min_columns || size.height < host.min_rows {
            tracing::warn!(
                width = size.width,
                height = size.height,
                min_columns = host.min_columns,
                min_rows = host.min_rows,
                "Terminal is smaller than the minimum window size"
            );
        }

        Ok(terminal)
    }

    /// Draw a frame.
    ///
    /// Returns the startup message after the first frame, `None` afterwards.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<Option<String>> {
        self.terminal.draw(render)?;

        if self.load.frame_drawn() {
            tracing::debug!("Initial load finished");
            Ok(Some(startup_message(Local::now())))
        } else {
            Ok(None)
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        if self.mouse_capture {
            let _ = execute!(self.terminal.backend_mut(), DisableMouseCapture);
        }
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_load_tracker_fires_once() {
        let mut tracker = LoadTracker::default();
        assert!(tracker.frame_drawn());
        assert!(!tracker.frame_drawn());
        assert!(!tracker.frame_drawn());
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: Result<()> =
            restore_on_error(Err(Error::terminal("no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_successful_setup_keeps_terminal() {
        let mut restored = false;
        let result = restore_on_error(Ok(3), || restored = true);
        assert_eq!(result.unwrap(), 3);
        assert!(!restored);
    }

    #[test]
    fn test_startup_message_format() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        assert_eq!(startup_message(at), "01/05/2024, 09:05:07");
    }
}
