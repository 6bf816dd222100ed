//! Mock real-time data feed.
//!
//! The feed periodically regenerates synthetic account and connection
//! records and pushes them to registered listeners. Randomness, time and
//! scheduling are injected so the feed can be driven deterministically.

mod clock;
mod generator;
mod provider;
mod random;
mod records;
mod scheduler;

pub use clock::{Clock, SystemClock};
pub use generator::{ACCOUNT_ID_PREFIX, CURRENCY, generate_account, generate_connection};
pub use provider::{
    FeedRecord, ListenerRegistry, MockDataProvider, MockDataProviderBuilder, ProviderState,
    TickOutcome,
};
pub use random::{RandomSource, RngSource, SequenceSource};
pub use records::{AccountRecord, AccountStatus, ConnectionRecord};
pub use scheduler::{ManualScheduler, Scheduler, TickTask, TimerHandle, TokioScheduler};

#[cfg(test)]
pub(crate) use clock::MockClock;
pub(crate) use generator::uniform_int;

use std::sync::Arc;

/// The kinds of record the feed publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Account,
    Connection,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Connection => write!(f, "connection"),
        }
    }
}

/// A registered callback receiving records of one kind.
///
/// Listeners are compared by pointer identity, so keep a clone of the
/// handle to unsubscribe later.
pub type Listener<T> = Arc<dyn Fn(&T) -> anyhow::Result<()> + Send + Sync>;

/// Wrap a closure as a [`Listener`].
pub fn listener<T, F>(f: F) -> Listener<T>
where
    F: Fn(&T) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}
