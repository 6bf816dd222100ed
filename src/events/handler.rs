//! Event handler for processing input events.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, Section, Store};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;

use super::InputEvent;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long to wait for input before yielding.
    poll_timeout: Duration,
    /// Store reference for state-aware handling.
    store_snapshot: StoreSnapshot,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy, Default)]
struct StoreSnapshot {
    show_help: bool,
    has_notification: bool,
    has_error: bool,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, poll_timeout: Duration) -> Self {
        Self {
            keybindings,
            poll_timeout,
            store_snapshot: StoreSnapshot::default(),
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = StoreSnapshot {
            show_help: store.app.show_help,
            has_notification: store.app.notification.is_some(),
            has_error: store.app.error.is_some(),
        };
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) => return Ok(self.handle_key(key)),
                CrosstermEvent::Mouse(mouse) => return Ok(self.handle_mouse(mouse)),
                // Terminal will automatically redraw
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = InputEvent::from(key);
        let bindings = &self.keybindings;

        if input.matches(&bindings.back) {
            return self.handle_back();
        }

        // While help is open only closing it is allowed.
        if self.store_snapshot.show_help {
            return (input.matches(&bindings.help) || input.matches(&bindings.quit))
                .then_some(Action::ToggleHelp);
        }

        if input.matches(&bindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&bindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&bindings.refresh) {
            return Some(Action::RefreshAll);
        }

        // Section switching
        let sections = [
            (&bindings.dashboard, Section::Dashboard),
            (&bindings.trading, Section::Trading),
            (&bindings.account, Section::Account),
            (&bindings.settings, Section::Settings),
            (&bindings.activity, Section::Activity),
            (&bindings.alerts, Section::Alerts),
        ];
        if let Some((_, section)) = sections.iter().find(|(b, _)| input.matches(b)) {
            return Some(Action::SetSection(*section));
        }
        if input.matches(&bindings.next_section) {
            return Some(Action::NextSection);
        }
        if input.matches(&bindings.previous_section) {
            return Some(Action::PreviousSection);
        }

        // Navigation
        if input.matches(&bindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&bindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }

        // Editing
        if input.matches(&bindings.select) || input.matches("space") {
            return Some(Action::ActivateSetting);
        }
        if input.matches(&bindings.increase) || key.code == KeyCode::Right {
            return Some(Action::IncreaseSetting);
        }
        if input.matches(&bindings.decrease) || key.code == KeyCode::Left {
            return Some(Action::DecreaseSetting);
        }

        None
    }

    /// Esc closes the topmost overlay.
    fn handle_back(&self) -> Option<Action> {
        let snapshot = &self.store_snapshot;
        if snapshot.show_help {
            Some(Action::ToggleHelp)
        } else if snapshot.has_notification {
            Some(Action::DismissNotification)
        } else if snapshot.has_error {
            Some(Action::ClearError)
        } else {
            None
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Notification;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn handler() -> EventHandler {
        EventHandler::new(KeyBindings::default(), Duration::from_millis(10))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_number_keys_switch_sections() {
        let handler = handler();
        let expected = [
            ('1', Section::Dashboard),
            ('2', Section::Trading),
            ('3', Section::Account),
            ('4', Section::Settings),
            ('5', Section::Activity),
            ('6', Section::Alerts),
        ];
        for (c, section) in expected {
            let action = handler.handle_key(press(KeyCode::Char(c)));
            assert!(
                matches!(action, Some(Action::SetSection(s)) if s == section),
                "key {c} gave {action:?}"
            );
        }
    }

    #[test]
    fn test_tab_cycles_sections() {
        let handler = handler();
        assert!(matches!(
            handler.handle_key(press(KeyCode::Tab)),
            Some(Action::NextSection)
        ));
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::PreviousSection)
        ));
    }

    #[test]
    fn test_editing_keys() {
        let handler = handler();
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter)),
            Some(Action::ActivateSetting)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char(' '))),
            Some(Action::ActivateSetting)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('+'))),
            Some(Action::IncreaseSetting)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('-'))),
            Some(Action::DecreaseSetting)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('j'))),
            Some(Action::ScrollDown)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Up)),
            Some(Action::ScrollUp)
        ));
    }

    #[test]
    fn test_escape_closes_topmost_overlay() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        let mut handler = handler();

        handler.update_store_snapshot(&store);
        assert!(handler.handle_key(press(KeyCode::Esc)).is_none());

        store.app.error = Some("boom".to_string());
        store.app.notification = Some(Notification::info("hello"));
        handler.update_store_snapshot(&store);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::DismissNotification)
        ));

        store.app.notification = None;
        handler.update_store_snapshot(&store);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::ClearError)
        ));
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.app.show_help = true;
        let mut handler = handler();
        handler.update_store_snapshot(&store);

        assert!(handler.handle_key(press(KeyCode::Char('1'))).is_none());
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q'))),
            Some(Action::ToggleHelp)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::ToggleHelp)
        ));
    }

    #[test]
    fn test_key_release_ignored() {
        let handler = handler();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(handler.handle_key(key).is_none());
    }
}
