//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, the mock feed, the host handlers, and rendering.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::EventHandler;
use crate::feed::{self, AccountRecord, ConnectionRecord, Listener, MockDataProvider};
use crate::host::{ContentSource, HostApi, HostEvent, MockHost, Window};
use crate::state::{Action, Notification, Store};
use crate::ui::Ui;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Forward feed records into the action channel.
fn forward<R, F>(action_tx: mpsc::UnboundedSender<Action>, to_action: F) -> Listener<R>
where
    R: 'static,
    F: Fn(&R) -> Action + Send + Sync + 'static,
{
    feed::listener(move |record: &R| {
        action_tx
            .send(to_action(record))
            .map_err(|e| Error::listener(format!("action channel closed: {}", e)))?;
        Ok(())
    })
}

/// Connects the mock feed to the action channel.
pub struct FeedBridge {
    provider: MockDataProvider,
    account_listener: Listener<AccountRecord>,
    connection_listener: Listener<ConnectionRecord>,
}

impl FeedBridge {
    /// Create listeners that turn feed records into store actions.
    pub fn new(provider: MockDataProvider, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let account_listener = forward(action_tx.clone(), |record: &AccountRecord| {
            Action::AccountUpdated(record.clone())
        });
        let connection_listener = forward(action_tx, |record: &ConnectionRecord| {
            Action::ConnectionUpdated(record.clone())
        });

        Self {
            provider,
            account_listener,
            connection_listener,
        }
    }

    /// The bridged provider.
    pub fn provider(&self) -> &MockDataProvider {
        &self.provider
    }

    /// Subscribe both listeners and start the timer.
    pub fn attach(&self) {
        self.provider.subscribe(self.account_listener.clone());
        self.provider.subscribe(self.connection_listener.clone());
        self.provider.start();
    }

    /// Unsubscribe both listeners and stop the timer.
    pub fn detach(&self) {
        self.provider.unsubscribe(&self.account_listener);
        self.provider.unsubscribe(&self.connection_listener);
        self.provider.stop();
    }
}

/// Pull fresh account and connection records from the host.
pub async fn refresh_all(store: &mut Store, host: &dyn HostApi) {
    store.reduce(Action::RefreshAll);

    let account = host.get_account_info().await;
    let connection = host.get_connection_status().await;

    match (account, connection) {
        (Ok(account), Ok(connection)) => {
            store.reduce(Action::AccountUpdated(account));
            store.reduce(Action::ConnectionUpdated(connection));
            store.reduce(Action::ShowNotification(Notification::success(
                "Data refreshed",
            )));
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Refresh failed: {}", e);
            store.reduce(Action::SetError(e.to_string()));
        }
    }

    store.reduce(Action::SetLoading(false));
}

/// Poll the host connection status once the refresh interval has passed.
///
/// Does nothing while auto refresh is off. Returns whether the host was polled.
pub async fn auto_refresh(
    store: &mut Store,
    host: &dyn HostApi,
    last_refresh: &mut Instant,
) -> bool {
    let settings = store.settings.settings;
    if !settings.auto_refresh || last_refresh.elapsed() < settings.refresh_interval.duration() {
        return false;
    }
    *last_refresh = Instant::now();

    match host.get_connection_status().await {
        Ok(connection) => store.reduce(Action::ConnectionUpdated(connection)),
        Err(e) => tracing::debug!("Connection poll failed: {}", e),
    }
    true
}

/// The main application.
pub struct App {
    /// Host window.
    window: Window,
    /// UI renderer.
    ui: Ui,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Mock data feed.
    feed: FeedBridge,
    /// Host request handlers.
    host: Arc<dyn HostApi>,
    /// Where the presentation content is served from.
    content: ContentSource,
    /// When the host was last polled.
    last_refresh: Instant,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let store = Store::new(action_tx.clone());

        let provider = MockDataProvider::builder()
            .config(config.feed.clone())
            .build()?;
        let feed = FeedBridge::new(provider, action_tx);

        let host: Arc<dyn HostApi> = Arc::new(MockHost::new());
        let content = ContentSource::from_env(&config.host);

        // Take over the terminal last so earlier failures leave it untouched
        let window = Window::create(&config.host, &config.ui)?;

        Ok(Self {
            window,
            ui: Ui::new(config.ui.clone(), config.keybindings.clone()),
            store,
            event_handler: EventHandler::new(
                config.keybindings.clone(),
                Duration::from_millis(config.ui.tick_rate_ms),
            ),
            action_rx,
            feed,
            host,
            content,
            last_refresh: Instant::now(),
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.startup().await;

        let result = self.event_loop().await;
        self.feed.detach();
        tracing::info!("Shut down");
        result
    }

    async fn startup(&mut self) {
        match self.host.get_app_version().await {
            Ok(version) => self.store.reduce(Action::SetVersion(version)),
            Err(e) => tracing::warn!("Failed to read app version: {}", e),
        }
        self.store
            .reduce(Action::SetContentSource(self.content.clone()));
        tracing::info!(
            source = %self.content,
            dev = self.content.is_dev(),
            "Serving presentation content"
        );

        // Seed the views before the first tick
        let provider = self.feed.provider();
        self.store
            .reduce(Action::AccountUpdated(provider.generate_account()));
        self.store
            .reduce(Action::ConnectionUpdated(provider.generate_connection()));

        self.feed.attach();
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            let loaded = self
                .window
                .draw(|frame| self.ui.render(frame, &self.store))?;
            if let Some(message) = loaded {
                let event = HostEvent::MainProcessMessage(message);
                tracing::info!(channel = event.channel(), "Window loaded");
                if let Err(e) = self.store.dispatch(Action::HostMessage(event)) {
                    if !e.is_recoverable() {
                        return Err(e);
                    }
                    tracing::warn!("Startup message dropped: {}", e);
                }
            }

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action).await;
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await;
                }
            }

            auto_refresh(&mut self.store, &*self.host, &mut self.last_refresh).await;

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action.
    async fn handle_action(&mut self, action: Action) {
        match action {
            Action::RefreshAll => {
                refresh_all(&mut self.store, &*self.host).await;
                self.last_refresh = Instant::now();
            }
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }
}
