//! Supervisor: wires the watcher, the change buffer and the trigger together
//!
//! Lifecycle: `Initializing -> BaselineSync -> Watching`. The only way out of
//! `Watching` is external cancellation (the shared `running` flag). There is
//! no drain on exit: changes accumulated but not yet drained are dropped.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::buffer::ChangeBuffer;
use crate::domain::SyncJobSpec;
use crate::error::AutosyncResult;
use crate::event::{self, EventSink, SyncEvent};
use crate::sync::{Executor, RsyncExecutor, Scheduler, SyncContext, SyncTrigger, TriggerOptions};
use crate::watcher::{ChangeSource, CommandWatch, WatchAdapter};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Initializing,
    BaselineSync,
    Watching,
    Stopped,
}

/// Options controlling a supervised run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupervisorOptions {
    pub trigger: TriggerOptions,
    /// Stop after the baseline sync
    pub once: bool,
}

impl SupervisorOptions {
    pub fn with_trigger(mut self, trigger: TriggerOptions) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}

pub struct Supervisor {
    ctx: Arc<SyncContext>,
    watch: Arc<WatchAdapter>,
    options: SupervisorOptions,
    state: Mutex<SupervisorState>,
    events: EventSink,
}

impl Supervisor {
    /// Supervisor with the rsync executor, the fswatch backend and no event sink
    pub fn new(job: SyncJobSpec, options: SupervisorOptions) -> Self {
        Self::with_parts(
            job,
            options,
            Box::new(RsyncExecutor),
            Box::new(CommandWatch::fswatch()),
            event::discard(),
        )
    }

    pub fn with_parts(
        job: SyncJobSpec,
        options: SupervisorOptions,
        executor: Box<dyn Executor>,
        source: Box<dyn ChangeSource>,
        events: EventSink,
    ) -> Self {
        let ctx = Arc::new(SyncContext::new(job, executor, Arc::clone(&events)));
        let watch = Arc::new(WatchAdapter::new(
            source,
            Arc::clone(ctx.buffer()),
            Arc::clone(&events),
        ));
        Self {
            ctx,
            watch,
            options,
            state: Mutex::new(SupervisorState::Initializing),
            events,
        }
    }

    pub fn job(&self) -> &SyncJobSpec {
        self.ctx.job()
    }

    pub fn buffer(&self) -> &Arc<ChangeBuffer> {
        self.ctx.buffer()
    }

    pub fn state(&self) -> SupervisorState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, state: SupervisorState) {
        info!(?state, "supervisor state");
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Run until `running` is cleared (blocking).
    ///
    /// Only startup validation errors are returned. Transfer and watch
    /// failures are reported through events and logs.
    pub fn run(&self, running: Arc<AtomicBool>) -> AutosyncResult<()> {
        self.enter(SupervisorState::Initializing);
        self.ctx.job().validate()?;

        self.enter(SupervisorState::BaselineSync);
        if let Err(e) = self.ctx.run_sync(true) {
            warn!("baseline sync could not run: {e}");
        }
        if self.options.once {
            self.enter(SupervisorState::Stopped);
            return Ok(());
        }

        self.enter(SupervisorState::Watching);
        let trigger = Arc::new(SyncTrigger::new(
            Arc::clone(&self.ctx),
            self.options.trigger,
        ));
        let scheduler = {
            let trigger = Arc::clone(&trigger);
            Scheduler::every(
                "autosync-ticker",
                self.options.trigger.interval,
                Arc::clone(&running),
                move || {
                    trigger.tick();
                },
            )?
        };

        let watch_thread = {
            let watch = Arc::clone(&self.watch);
            let running = Arc::clone(&running);
            let local_dir = self.ctx.job().local_dir.clone();
            thread::Builder::new()
                .name("autosync-watch".to_string())
                .spawn(move || watch.run(&running, &local_dir))?
        };

        while running.load(Ordering::SeqCst) {
            thread::sleep(POLL_INTERVAL);
        }

        (self.events)(SyncEvent::Shutdown);
        scheduler.stop();
        // A returned watch error has already been reported by the adapter
        if let Err(panic) = watch_thread.join() {
            error!("watch thread panicked: {}", panic_message(panic.as_ref()));
        }
        self.enter(SupervisorState::Stopped);
        Ok(())
    }

    /// Local directory being watched
    pub fn local_dir(&self) -> &Path {
        &self.ctx.job().local_dir
    }

    pub fn backend(&self) -> &'static str {
        self.watch.backend()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
