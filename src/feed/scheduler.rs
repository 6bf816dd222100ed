//! Repeating timers driving the feed.

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};

/// Work run on every timer firing.
pub type TickTask = Box<dyn FnMut() + Send + 'static>;

/// Schedules repeating work.
pub trait Scheduler: Send + Sync {
    /// Run `task` every `period`, first firing one period from now.
    fn schedule_repeating(&self, period: Duration, task: TickTask) -> TimerHandle;
}

/// Handle to a scheduled timer. Dropping it cancels the timer.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    /// Create a handle that runs `cancel` once when cancelled or dropped.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the timer.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler spawning interval tasks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Create a scheduler for the given runtime.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Create a scheduler for the runtime we are currently inside.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| Error::application(format!("No tokio runtime: {}", e)))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, period: Duration, mut task: TickTask) -> TimerHandle {
        let join = self.handle.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                task();
            }
        });

        TimerHandle::new(move || join.abort())
    }
}

struct ManualTimer {
    id: u64,
    period: Duration,
    task: Arc<Mutex<TickTask>>,
}

/// Scheduler whose timers fire only when asked.
///
/// Used to drive the feed deterministically.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timers: Arc<Mutex<Vec<ManualTimer>>>,
    next_id: Arc<AtomicU64>,
}

impl ManualScheduler {
    /// Create a scheduler with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live timers.
    pub fn active_timers(&self) -> usize {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Periods of the live timers, in scheduling order.
    pub fn periods(&self) -> Vec<Duration> {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|t| t.period)
            .collect()
    }

    /// Fire every live timer once. Returns how many fired.
    pub fn fire(&self) -> usize {
        let tasks: Vec<Arc<Mutex<TickTask>>> = self
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|t| Arc::clone(&t.task))
            .collect();

        for task in &tasks {
            let mut task = task.lock().unwrap_or_else(PoisonError::into_inner);
            task();
        }
        tasks.len()
    }

    /// Fire every live timer `times` times.
    pub fn fire_n(&self, times: usize) {
        for _ in 0..times {
            self.fire();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, period: Duration, task: TickTask) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ManualTimer {
                id,
                period,
                task: Arc::new(Mutex::new(task)),
            });

        let timers = Arc::clone(&self.timers);
        TimerHandle::new(move || {
            timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|t| t.id != id);
        })
    }
}
