//! Non-overlapping sync trigger
//!
//! Each tick drains the change buffer and runs at most one transfer. A tick
//! that fires while the previous one is still transferring is skipped, and
//! whatever accumulated in the meantime is picked up by a later tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::context::SyncContext;
use crate::domain::SyncRun;
use crate::event::SyncEvent;

/// Default tick interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Previous transfer still running; nothing was touched
    Skipped,
    /// Nothing pending
    Idle,
    /// Changes drained and a transfer ran (successfully or not)
    Synced(SyncRun),
    /// Changes drained but the transfer could not be launched
    Failed(String),
}

/// Options for the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOptions {
    pub interval: Duration,
    /// Put drained changes back when the transfer fails, ahead of anything
    /// observed while it ran
    pub requeue_on_failure: bool,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            requeue_on_failure: false,
        }
    }
}

impl TriggerOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_requeue_on_failure(mut self, requeue: bool) -> Self {
        self.requeue_on_failure = requeue;
        self
    }
}

pub struct SyncTrigger {
    ctx: Arc<SyncContext>,
    options: TriggerOptions,
    in_flight: AtomicBool,
}

impl SyncTrigger {
    pub fn new(ctx: Arc<SyncContext>, options: TriggerOptions) -> Self {
        Self {
            ctx,
            options,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> TriggerOptions {
        self.options
    }

    /// Whether a transfer started by a tick is still running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fire once. Safe to call from several threads at the same time.
    pub fn tick(&self) -> TickOutcome {
        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            debug!("previous sync still running, tick skipped");
            return TickOutcome::Skipped;
        };

        let Some(content) = self.ctx.buffer().drain_if_non_empty() else {
            return TickOutcome::Idle;
        };

        info!("{content}");
        self.ctx.emit(SyncEvent::ChangesDetected {
            content: content.clone(),
        });

        match self.ctx.run_sync(false) {
            Ok(run) => {
                if !run.is_success() {
                    self.requeue(&content);
                }
                TickOutcome::Synced(run)
            }
            Err(e) => {
                self.requeue(&content);
                TickOutcome::Failed(e.to_string())
            }
        }
    }

    fn requeue(&self, content: &str) {
        if self.options.requeue_on_failure {
            warn!("transfer failed, keeping changes pending for the next tick");
            self.ctx.buffer().prepend(&format!("{content}\n"));
        }
    }
}

/// Holds the in-flight flag for the duration of one tick
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
