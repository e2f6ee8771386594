//! The reveal scheduler: cancellable fixed-period tick tasks.
//!
//! Each reveal is driven by one owned tokio task. The owner holds a
//! [`RevealHandle`]; replacing or dropping it aborts the task, so at most
//! one timer is ever pending for a given playback session.

use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

/// Reveal rate of the original reader: one character every 15 ms.
pub const DEFAULT_CHARS_PER_SECOND: u32 = 66;

/// Spawns fixed-period reveal tasks.
#[derive(Debug, Clone, Copy)]
pub struct RevealScheduler {
    period: Duration,
}

impl RevealScheduler {
    /// A scheduler ticking at `chars_per_second`, clamped to at least one
    /// tick per millisecond.
    #[must_use]
    pub fn from_chars_per_second(chars_per_second: u32) -> Self {
        let cps = u64::from(chars_per_second.max(1));
        Self {
            period: Duration::from_millis((1000 / cps).max(1)),
        }
    }

    /// The tick period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns a task calling `step` once per period until it returns false.
    ///
    /// The period is stable: a missed deadline skips ahead instead of
    /// bursting to catch up. The first step fires one full period after
    /// spawning.
    pub fn spawn<F>(&self, mut step: F) -> AbortHandle
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let period = self.period;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // A tokio interval yields immediately on its first tick.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !step() {
                    break;
                }
            }
        })
        .abort_handle()
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::from_chars_per_second(DEFAULT_CHARS_PER_SECOND)
    }
}

/// Owner of the at-most-one pending reveal task for a session.
#[derive(Debug, Default)]
pub struct RevealHandle {
    task: Option<AbortHandle>,
}

impl RevealHandle {
    /// A handle with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the pending task, if any. Cancellation is total: no further
    /// steps run once this returns.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Arms a new task, cancelling the previous one first.
    pub fn replace(&mut self, task: AbortHandle) {
        self.cancel();
        self.task = Some(task);
    }

    /// Whether an unfinished task is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
