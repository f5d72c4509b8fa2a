//! Domain Layer
//!
//! Value types shared by every component:
//!
//! - `job` - `SyncJobSpec`, the immutable description of one sync target
//! - `run` - `SyncRun`, the outcome of one transfer invocation

pub mod job;
pub mod run;

pub use job::{SyncJobSpec, DEFAULT_RSYNC_PROGRAM, DEFAULT_SSH_PROGRAM};
pub use run::{RunStatus, SyncRun};
