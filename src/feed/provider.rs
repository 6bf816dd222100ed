//! The mock data provider.

use super::clock::{Clock, SystemClock};
use super::generator::{generate_account, generate_connection};
use super::random::{RandomSource, RngSource};
use super::records::{AccountRecord, ConnectionRecord};
use super::scheduler::{Scheduler, TimerHandle, TokioScheduler};
use super::{FeedKind, Listener};
use crate::config::FeedConfig;
use crate::error::{Result, payload_message};

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lifecycle of the provider's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderState {
    #[default]
    Stopped,
    Running,
}

/// What a single tick published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// An account record was generated and broadcast.
    pub account: bool,
    /// A connection record was generated and broadcast.
    pub connection: bool,
}

/// Ordered listener lists, one per record kind.
#[derive(Default)]
pub struct ListenerRegistry {
    account: Mutex<Vec<Listener<AccountRecord>>>,
    connection: Mutex<Vec<Listener<ConnectionRecord>>>,
}

/// A record type the feed can publish.
pub trait FeedRecord: Clone + Send + Sync + 'static {
    /// Which feed this record travels on.
    const KIND: FeedKind;

    /// The listener list for this record type.
    fn listeners(registry: &ListenerRegistry) -> &Mutex<Vec<Listener<Self>>>;
}

impl FeedRecord for AccountRecord {
    const KIND: FeedKind = FeedKind::Account;

    fn listeners(registry: &ListenerRegistry) -> &Mutex<Vec<Listener<Self>>> {
        &registry.account
    }
}

impl FeedRecord for ConnectionRecord {
    const KIND: FeedKind = FeedKind::Connection;

    fn listeners(registry: &ListenerRegistry) -> &Mutex<Vec<Listener<Self>>> {
        &registry.connection
    }
}

/// Builder for creating a [`MockDataProvider`].
pub struct MockDataProviderBuilder {
    config: FeedConfig,
    random: Option<Box<dyn RandomSource>>,
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl MockDataProviderBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: FeedConfig::default(),
            random: None,
            clock: None,
            scheduler: None,
        }
    }

    /// Set the feed configuration.
    pub fn config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the random source.
    pub fn random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    /// Set the clock used to stamp connection records.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the scheduler driving ticks.
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Build the provider.
    ///
    /// Without an explicit scheduler this must run inside a tokio runtime.
    pub fn build(self) -> Result<MockDataProvider> {
        let scheduler: Arc<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::current()?),
        };

        let random: Box<dyn RandomSource> = match (self.random, self.config.seed) {
            (Some(random), _) => random,
            (None, Some(seed)) => Box::new(RngSource::seeded(seed)),
            (None, None) => Box::new(RngSource::from_entropy()),
        };

        Ok(MockDataProvider {
            inner: Arc::new(Inner {
                config: self.config,
                random: Mutex::new(random),
                clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
                scheduler,
                timer: Mutex::new(None),
                listeners: ListenerRegistry::default(),
            }),
        })
    }
}

impl Default for MockDataProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct Inner {
    config: FeedConfig,
    random: Mutex<Box<dyn RandomSource>>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    timer: Mutex<Option<TimerHandle>>,
    listeners: ListenerRegistry,
}

impl Inner {
    fn tick(&self) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        let account = {
            let mut random = lock(&self.random);
            let threshold = 1.0 - self.config.account_update_probability;
            (random.next_f64() > threshold).then(|| generate_account(&mut **random))
        };
        if let Some(account) = account {
            self.broadcast(&account);
            outcome.account = true;
        }

        let connection = {
            let mut random = lock(&self.random);
            let threshold = 1.0 - self.config.connection_update_probability;
            (random.next_f64() > threshold)
                .then(|| generate_connection(&mut **random, &*self.clock))
        };
        if let Some(connection) = connection {
            self.broadcast(&connection);
            outcome.connection = true;
        }

        tracing::trace!(
            account = outcome.account,
            connection = outcome.connection,
            "Feed tick"
        );
        outcome
    }

    fn broadcast<R: FeedRecord>(&self, record: &R) -> usize {
        // Snapshot so listeners may (un)subscribe while we deliver.
        let snapshot: Vec<Listener<R>> = lock(R::listeners(&self.listeners)).clone();

        let mut delivered = 0;
        for (index, listener) in snapshot.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(record))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    tracing::warn!(kind = %R::KIND, index, error = %e, "Feed listener failed");
                }
                Err(payload) => {
                    let message = payload_message(&*payload);
                    tracing::warn!(kind = %R::KIND, index, %message, "Feed listener panicked");
                }
            }
        }
        delivered
    }
}

/// Periodically publishes synthetic account and connection records.
///
/// Cloning yields another handle to the same provider.
#[derive(Clone)]
pub struct MockDataProvider {
    inner: Arc<Inner>,
}

impl MockDataProvider {
    /// Start building a provider.
    pub fn builder() -> MockDataProviderBuilder {
        MockDataProviderBuilder::new()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProviderState {
        if lock(&self.inner.timer).is_some() {
            ProviderState::Running
        } else {
            ProviderState::Stopped
        }
    }

    /// Check if the timer is running.
    pub fn is_running(&self) -> bool {
        self.state() == ProviderState::Running
    }

    /// Start the repeating timer. Does nothing if already running.
    pub fn start(&self) {
        let mut timer = lock(&self.inner.timer);
        if timer.is_some() {
            tracing::debug!("Feed already running");
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let period = self.inner.config.interval();
        let handle = self.inner.scheduler.schedule_repeating(
            period,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.tick();
                }
            }),
        );
        *timer = Some(handle);

        tracing::info!(interval_ms = period.as_millis() as u64, "Feed started");
    }

    /// Stop the repeating timer. Does nothing if already stopped.
    pub fn stop(&self) {
        let handle = lock(&self.inner.timer).take();
        match handle {
            Some(handle) => {
                handle.cancel();
                tracing::info!("Feed stopped");
            }
            None => tracing::debug!("Feed already stopped"),
        }
    }

    /// Register a listener for records of type `R`.
    pub fn subscribe<R: FeedRecord>(&self, listener: Listener<R>) {
        let mut listeners = lock(R::listeners(&self.inner.listeners));
        listeners.push(listener);
        tracing::debug!(kind = %R::KIND, count = listeners.len(), "Listener subscribed");
    }

    /// Remove the first registration of `listener`.
    ///
    /// Returns whether a registration was removed.
    pub fn unsubscribe<R: FeedRecord>(&self, listener: &Listener<R>) -> bool {
        let mut listeners = lock(R::listeners(&self.inner.listeners));
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                tracing::debug!(kind = %R::KIND, count = listeners.len(), "Listener removed");
                true
            }
            None => false,
        }
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: FeedKind) -> usize {
        match kind {
            FeedKind::Account => lock(&self.inner.listeners.account).len(),
            FeedKind::Connection => lock(&self.inner.listeners.connection).len(),
        }
    }

    /// Run one timer firing immediately.
    pub fn tick(&self) -> TickOutcome {
        self.inner.tick()
    }

    /// Generate an account record without broadcasting it.
    pub fn generate_account(&self) -> AccountRecord {
        generate_account(&mut **lock(&self.inner.random))
    }

    /// Generate a connection record without broadcasting it.
    pub fn generate_connection(&self) -> ConnectionRecord {
        generate_connection(&mut **lock(&self.inner.random), &*self.inner.clock)
    }

    /// Broadcast a record to its listeners. Returns how many succeeded.
    pub fn publish<R: FeedRecord>(&self, record: &R) -> usize {
        self.inner.broadcast(record)
    }
}

impl std::fmt::Debug for MockDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDataProvider")
            .field("state", &self.state())
            .field("account_listeners", &self.listener_count(FeedKind::Account))
            .field(
                "connection_listeners",
                &self.listener_count(FeedKind::Connection),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::random::SequenceSource;
    use crate::feed::scheduler::ManualScheduler;
    use crate::feed::{AccountStatus, MockClock, listener};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    type Received<T> = Arc<Mutex<Vec<T>>>;

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        Arc::new(clock)
    }

    fn provider_with(samples: &[f64], scheduler: &ManualScheduler) -> MockDataProvider {
        MockDataProvider::builder()
            .random(SequenceSource::new(samples.to_vec()))
            .clock(fixed_clock())
            .scheduler(Arc::new(scheduler.clone()))
            .build()
            .unwrap()
    }

    fn recorder<T: Clone + Send + 'static>() -> (Listener<T>, Received<T>) {
        let received: Received<T> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let listener = listener(move |record: &T| {
            sink.lock().unwrap().push(record.clone());
            Ok(())
        });
        (listener, received)
    }

    // Account flip, four account draws, connection flip, two connection draws.
    const BOTH_UPDATE: [f64; 8] = [0.9, 0.5, 0.5, 0.5, 0.95, 0.9, 0.9, 0.5];
    const NEITHER_UPDATE: [f64; 2] = [0.1, 0.1];

    #[test]
    fn test_initial_state_is_stopped() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&NEITHER_UPDATE, &scheduler);
        assert_eq!(provider.state(), ProviderState::Stopped);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&NEITHER_UPDATE, &scheduler);

        provider.start();
        provider.start();
        provider.start();

        assert!(provider.is_running());
        assert_eq!(scheduler.active_timers(), 1);
        assert_eq!(scheduler.periods(), vec![Duration::from_millis(3000)]);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&NEITHER_UPDATE, &scheduler);

        provider.stop();
        assert_eq!(provider.state(), ProviderState::Stopped);

        provider.start();
        provider.stop();
        provider.stop();
        assert_eq!(provider.state(), ProviderState::Stopped);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_restart_after_stop() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&NEITHER_UPDATE, &scheduler);

        provider.start();
        provider.stop();
        provider.start();
        assert!(provider.is_running());
        assert_eq!(scheduler.active_timers(), 1);
    }

    #[test]
    fn test_fan_out_delivers_identical_records() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);

        let recorders: Vec<_> = (0..3).map(|_| recorder::<AccountRecord>()).collect();
        for (listener, _) in &recorders {
            provider.subscribe(Arc::clone(listener));
        }

        let outcome = provider.tick();
        assert!(outcome.account);

        let first = recorders[0].1.lock().unwrap()[0].clone();
        for (_, received) in &recorders {
            let received = received.lock().unwrap();
            assert_eq!(received.len(), 1);
            assert_eq!(received[0], first);
        }
        assert_eq!(first.balance, dec!(3500.00));
        assert_eq!(first.status, AccountStatus::Active);
    }

    #[test]
    fn test_same_listener_subscribed_twice_is_called_twice() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);
        let (listener, received) = recorder::<ConnectionRecord>();

        provider.subscribe(Arc::clone(&listener));
        provider.subscribe(Arc::clone(&listener));
        provider.tick();

        assert_eq!(received.lock().unwrap().len(), 2);
        assert!(provider.unsubscribe(&listener));
        assert_eq!(provider.listener_count(FeedKind::Connection), 1);
    }

    #[test]
    fn test_unsubscribed_listener_receives_nothing() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);
        let (listener, received) = recorder::<AccountRecord>();

        provider.subscribe(Arc::clone(&listener));
        assert!(provider.unsubscribe(&listener));
        assert!(!provider.unsubscribe(&listener));
        provider.tick();

        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_unknown_listener_is_noop() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);
        let (kept, _) = recorder::<AccountRecord>();
        let (stranger, _) = recorder::<AccountRecord>();

        provider.subscribe(kept);
        assert!(!provider.unsubscribe(&stranger));
        assert_eq!(provider.listener_count(FeedKind::Account), 1);
    }

    #[test]
    fn test_failing_listener_does_not_block_others() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);

        let failing: Listener<AccountRecord> = listener(|_| anyhow::bail!("listener A failed"));
        let (recording, received) = recorder::<AccountRecord>();
        let (connection_listener, connections) = recorder::<ConnectionRecord>();

        provider.subscribe(failing);
        provider.subscribe(recording);
        provider.subscribe(connection_listener);

        let outcome = provider.tick();
        assert_eq!(outcome, TickOutcome { account: true, connection: true });
        assert_eq!(received.lock().unwrap().len(), 1);
        assert_eq!(connections.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);

        let panicking: Listener<AccountRecord> = listener(|_| panic!("listener blew up"));
        let (recording, received) = recorder::<AccountRecord>();
        provider.subscribe(panicking);
        provider.subscribe(recording);

        let account = provider.generate_account();
        assert_eq!(provider.publish(&account), 1);
        assert_eq!(received.lock().unwrap().as_slice(), &[account]);
    }

    #[test]
    fn test_listener_may_unsubscribe_itself_mid_broadcast() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);

        let slot: Arc<Mutex<Option<Listener<AccountRecord>>>> = Arc::new(Mutex::new(None));
        let handle = provider.clone();
        let own = Arc::clone(&slot);
        let one_shot: Listener<AccountRecord> = listener(move |_| {
            if let Some(me) = own.lock().unwrap().take() {
                handle.unsubscribe(&me);
            }
            Ok(())
        });
        *slot.lock().unwrap() = Some(Arc::clone(&one_shot));

        let (recording, received) = recorder::<AccountRecord>();
        provider.subscribe(one_shot);
        provider.subscribe(recording);

        let account = provider.generate_account();
        assert_eq!(provider.publish(&account), 2);
        assert_eq!(received.lock().unwrap().len(), 1);
        assert_eq!(provider.listener_count(FeedKind::Account), 1);
    }

    #[test]
    fn test_coin_flips_gate_each_kind() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&NEITHER_UPDATE, &scheduler);
        let (accounts, account_received) = recorder::<AccountRecord>();
        let (connections, connection_received) = recorder::<ConnectionRecord>();
        provider.subscribe(accounts);
        provider.subscribe(connections);

        assert_eq!(provider.tick(), TickOutcome::default());
        assert!(account_received.lock().unwrap().is_empty());
        assert!(connection_received.lock().unwrap().is_empty());
    }

    #[test]
    fn test_default_probabilities_match_thresholds() {
        let scheduler = ManualScheduler::new();
        // 0.7 is not above the 0.7 account threshold; 0.51 is above 0.5.
        let provider = provider_with(&[0.7, 0.51, 0.9, 0.5], &scheduler);
        assert_eq!(
            provider.tick(),
            TickOutcome {
                account: false,
                connection: true
            }
        );
    }

    #[test]
    fn test_end_to_end_forced_tick_then_stop() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);
        let (listener, received) = recorder::<AccountRecord>();

        provider.subscribe(listener);
        provider.start();
        assert_eq!(scheduler.fire(), 1);

        {
            let received = received.lock().unwrap();
            assert_eq!(received.len(), 1);
            let account = &received[0];
            assert!(account.balance >= dec!(1000) && account.balance < dec!(6000));
            assert!(matches!(
                account.status,
                AccountStatus::Active | AccountStatus::Suspended
            ));
        }

        provider.stop();
        scheduler.fire_n(5);
        assert_eq!(received.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dropping_provider_ends_ticks() {
        let scheduler = ManualScheduler::new();
        let provider = provider_with(&BOTH_UPDATE, &scheduler);
        provider.start();
        drop(provider);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_seeded_config_is_reproducible() {
        let config = FeedConfig {
            seed: Some(11),
            ..FeedConfig::default()
        };
        let build = || {
            MockDataProvider::builder()
                .config(config.clone())
                .clock(fixed_clock())
                .scheduler(Arc::new(ManualScheduler::new()))
                .build()
                .unwrap()
        };
        assert_eq!(build().generate_account(), build().generate_account());
    }
}
