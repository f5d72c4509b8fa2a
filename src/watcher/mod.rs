//! File watching for continuous sync
//!
//! A watch session feeds change notifications into the job's `ChangeBuffer`.
//! Two backends implement `ChangeSource`:
//! - `CommandWatch` - runs an external watch program (`fswatch` by default)
//!   and pumps its output records into the buffer
//! - `NativeWatch` - in-process recursive watch via the `notify` crate
//!
//! The adapter does not interpret notifications. Coalescing happens because
//! the trigger drains the whole accumulated batch at once.

mod command;
mod native;

pub use command::{CommandWatch, RecordFormat, DIR_PLACEHOLDER};
pub use native::NativeWatch;

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::buffer::ChangeBuffer;
use crate::error::WatchError;
use crate::event::{EventSink, SyncEvent};

/// A producer of change notifications for one directory
pub trait ChangeSource: Send + Sync {
    /// Backend name (for logging)
    fn name(&self) -> &'static str;

    /// Watch `local_dir`, appending every notification to `buffer`.
    ///
    /// Blocks until `running` is cleared (returns `Ok`) or the backend fails.
    fn run(
        &self,
        local_dir: &Path,
        buffer: &Arc<ChangeBuffer>,
        running: &AtomicBool,
    ) -> Result<(), WatchError>;
}

/// Which watch backend to run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WatchBackend {
    /// `fswatch -0 <dir>`
    #[default]
    Fswatch,
    /// In-process `notify` watcher
    Native,
    /// Configured external command (`[watch] command = [...]`)
    Command,
}

impl WatchBackend {
    /// Build the change source. `command` is only used by `Command`.
    pub fn source(self, command: &[String]) -> Option<Box<dyn ChangeSource>> {
        match self {
            WatchBackend::Fswatch => Some(Box::new(CommandWatch::fswatch())),
            WatchBackend::Native => Some(Box::new(NativeWatch)),
            WatchBackend::Command => {
                CommandWatch::from_argv(command).map(|w| Box::new(w) as Box<dyn ChangeSource>)
            }
        }
    }

    /// Program that must be installed for this backend, if any
    pub fn required_program(self, command: &[String]) -> Option<String> {
        match self {
            WatchBackend::Fswatch => Some("fswatch".to_string()),
            WatchBackend::Native => None,
            WatchBackend::Command => command.first().cloned(),
        }
    }
}

impl std::fmt::Display for WatchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchBackend::Fswatch => write!(f, "fswatch"),
            WatchBackend::Native => write!(f, "native"),
            WatchBackend::Command => write!(f, "command"),
        }
    }
}

/// One watch session bound to one buffer
pub struct WatchAdapter {
    source: Box<dyn ChangeSource>,
    buffer: Arc<ChangeBuffer>,
    events: EventSink,
}

impl WatchAdapter {
    pub fn new(source: Box<dyn ChangeSource>, buffer: Arc<ChangeBuffer>, events: EventSink) -> Self {
        Self {
            source,
            buffer,
            events,
        }
    }

    pub fn backend(&self) -> &'static str {
        self.source.name()
    }

    /// Run the session (blocking). Failures are reported before returning.
    pub fn run(&self, running: &AtomicBool, local_dir: &Path) -> Result<(), WatchError> {
        info!("watch starting for {}", local_dir.display());
        (self.events)(SyncEvent::WatchStarted {
            local_dir: local_dir.display().to_string(),
            backend: self.source.name().to_string(),
        });

        let result = self.source.run(local_dir, &self.buffer, running);
        if let Err(e) = &result {
            error!(backend = self.source.name(), "watch session ended: {e}");
            (self.events)(SyncEvent::WatchFailed {
                message: e.to_string(),
            });
        }
        result
    }
}
