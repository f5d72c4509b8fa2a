//! Shared state for one sync job
//!
//! Built once by the supervisor and shared by `Arc` with the watcher and the
//! trigger. There are no process-wide singletons.

use std::sync::Arc;

use tracing::error;

use super::executor::Executor;
use crate::buffer::ChangeBuffer;
use crate::domain::{SyncJobSpec, SyncRun};
use crate::error::SyncError;
use crate::event::{EventSink, SyncEvent};

pub struct SyncContext {
    job: SyncJobSpec,
    buffer: Arc<ChangeBuffer>,
    executor: Box<dyn Executor>,
    events: EventSink,
}

impl SyncContext {
    pub fn new(job: SyncJobSpec, executor: Box<dyn Executor>, events: EventSink) -> Self {
        Self {
            job,
            buffer: Arc::new(ChangeBuffer::new()),
            executor,
            events,
        }
    }

    pub fn job(&self) -> &SyncJobSpec {
        &self.job
    }

    pub fn buffer(&self) -> &Arc<ChangeBuffer> {
        &self.buffer
    }

    pub fn emit(&self, event: SyncEvent) {
        (self.events)(event)
    }

    /// Run one transfer and report it. `baseline` marks the startup sync.
    pub fn run_sync(&self, baseline: bool) -> Result<SyncRun, SyncError> {
        self.emit(SyncEvent::SyncStarted {
            command_line: self.executor.command_line(&self.job),
            baseline,
        });

        match self.executor.run_sync(&self.job) {
            Ok(run) => {
                self.emit(SyncEvent::SyncFinished {
                    success: run.is_success(),
                    code: run.status.code(),
                    elapsed_ms: u64::try_from(run.elapsed.as_millis()).unwrap_or(u64::MAX),
                    baseline,
                });
                Ok(run)
            }
            Err(e) => {
                error!(executor = self.executor.name(), "{e}");
                self.emit(SyncEvent::SyncError {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for SyncContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncContext")
            .field("job", &self.job)
            .field("buffer", &self.buffer)
            .field("executor", &self.executor.name())
            .finish()
    }
}
