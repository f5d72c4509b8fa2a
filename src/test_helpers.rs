//! Fakes shared by unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::domain::{RunStatus, SyncJobSpec, SyncRun};
use crate::error::SyncError;
use crate::event::{EventSink, SyncEvent};
use crate::sync::{build_command_line, Executor};

/// Counters observed by a `FakeExecutor`
#[derive(Debug, Default)]
pub struct ExecutorStats {
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ExecutorStats {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Executor that sleeps instead of transferring
pub struct FakeExecutor {
    pub stats: Arc<ExecutorStats>,
    delay: Duration,
    exit_code: i32,
    fail_spawn: bool,
}

impl FakeExecutor {
    pub fn new() -> (Self, Arc<ExecutorStats>) {
        let stats = Arc::new(ExecutorStats::default());
        (
            Self {
                stats: Arc::clone(&stats),
                delay: Duration::ZERO,
                exit_code: 0,
                fail_spawn: false,
            },
            stats,
        )
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn failing_to_spawn(mut self) -> Self {
        self.fail_spawn = true;
        self
    }
}

impl Executor for FakeExecutor {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn command_line(&self, spec: &SyncJobSpec) -> String {
        build_command_line(spec)
    }

    fn run_sync(&self, spec: &SyncJobSpec) -> Result<SyncRun, SyncError> {
        self.stats.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_spawn {
            return Err(SyncError::Spawn {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "sh not found"),
            });
        }
        Ok(SyncRun {
            command_line: self.command_line(spec),
            status: RunStatus::Exited {
                code: self.exit_code,
            },
            stdout: String::new(),
            stderr: String::new(),
            elapsed: self.delay,
        })
    }
}

/// Event sink that records every event
pub fn recording_sink() -> (EventSink, Arc<Mutex<Vec<SyncEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&events);
    let sink: EventSink = Arc::new(move |event| captured.lock().unwrap().push(event));
    (sink, events)
}

pub fn sample_job(local_dir: &std::path::Path) -> SyncJobSpec {
    SyncJobSpec::new(local_dir, "/root/workspace/app", "DevCloud", 36000, "root")
}
