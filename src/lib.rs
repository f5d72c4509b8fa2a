//! Autosync - watch a local directory and mirror it to a remote host
//!
//! Changes reported by a watch backend accumulate in a `ChangeBuffer`. A
//! non-overlapping trigger drains the buffer on a fixed interval and runs one
//! `rsync --delete` transfer per non-empty batch. The `Supervisor` runs an
//! unconditional baseline sync first, then keeps both running until
//! cancelled.

pub mod buffer;
pub mod config;
pub mod domain;
pub mod error;
pub mod event;
pub mod presentation;
pub mod supervisor;
pub mod sync;
pub mod watcher;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-exports for convenience
pub use buffer::ChangeBuffer;
pub use config::Config;
pub use domain::{RunStatus, SyncJobSpec, SyncRun};
pub use error::{AutosyncError, AutosyncResult, SyncError, WatchError};
pub use event::{EventSink, SyncEvent};
pub use supervisor::{Supervisor, SupervisorOptions, SupervisorState};
pub use sync::{Executor, RsyncExecutor, SyncTrigger, TickOutcome, TriggerOptions};
pub use watcher::{ChangeSource, CommandWatch, NativeWatch, WatchAdapter, WatchBackend};
