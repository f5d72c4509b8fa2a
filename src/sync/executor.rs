//! Transfer executors
//!
//! Defines the interface for running one synchronization of a job, plus the
//! rsync-over-ssh implementation used in production.

use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::command::build_command_line;
use crate::domain::{RunStatus, SyncJobSpec, SyncRun};
use crate::error::SyncError;

/// Runs one transfer of a job to completion
pub trait Executor: Send + Sync {
    /// Get the name of this executor (for logging)
    fn name(&self) -> &'static str;

    /// The command line that `run_sync` would execute
    fn command_line(&self, spec: &SyncJobSpec) -> String;

    /// Run the transfer, blocking until it finishes.
    ///
    /// A transfer that runs and exits non-zero is `Ok` with a failed status.
    fn run_sync(&self, spec: &SyncJobSpec) -> Result<SyncRun, SyncError>;
}

/// Executor that shells out to rsync with mirror-delete over ssh
#[derive(Debug, Clone, Copy, Default)]
pub struct RsyncExecutor;

impl Executor for RsyncExecutor {
    fn name(&self) -> &'static str {
        "rsync"
    }

    fn command_line(&self, spec: &SyncJobSpec) -> String {
        build_command_line(spec)
    }

    fn run_sync(&self, spec: &SyncJobSpec) -> Result<SyncRun, SyncError> {
        let command_line = self.command_line(spec);
        info!("{command_line}");

        let started = Instant::now();
        let output = Command::new("sh")
            .arg("-c")
            .arg(&command_line)
            .stdin(Stdio::null())
            .output();
        let elapsed = started.elapsed();
        info!("done!");

        let output = output.map_err(|source| SyncError::Spawn { source })?;
        let run = SyncRun {
            command_line,
            status: RunStatus::from(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed,
        };

        for line in run.stdout.lines() {
            debug!(target: "autosync::transfer", "{line}");
        }
        if !run.is_success() {
            warn!(
                status = %run.status,
                command = %run.command_line,
                stderr = %run.stderr.trim(),
                "transfer failed"
            );
        }

        Ok(run)
    }
}

/// Check if `program` is installed and runs
pub fn check_available(program: &str, version_flag: &str) -> bool {
    Command::new(program)
        .arg(version_flag)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}
