//! Synchronization: command construction, execution and triggering
//!
//! - `command` - Builds the rsync command line for a job
//! - `executor` - `Executor` trait and the rsync implementation
//! - `context` - `SyncContext`, the per-job state shared between threads
//! - `trigger` - `SyncTrigger`, the non-overlapping drain-and-sync tick
//! - `scheduler` - Fixed-rate ticker driving the trigger

mod command;
mod context;
mod executor;
mod scheduler;
mod trigger;


pub use command::{build_command_line, quote_if_needed, remote_shell_program, shell_quote, BASE_FLAGS};
pub use context::SyncContext;
pub use executor::{check_available, Executor, RsyncExecutor};
pub use scheduler::Scheduler;
pub use trigger::{SyncTrigger, TickOutcome, TriggerOptions, DEFAULT_INTERVAL_MS};
