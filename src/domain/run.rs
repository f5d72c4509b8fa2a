//! Outcome of one transfer invocation

use std::process::ExitStatus;
use std::time::Duration;

use serde::Serialize;

/// How the transfer process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunStatus {
    /// Exited with a status code
    Exited { code: i32 },
    /// Killed by a signal (unix) or otherwise ended without a code
    Terminated,
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Exited { code: 0 })
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            RunStatus::Exited { code } => Some(*code),
            RunStatus::Terminated => None,
        }
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => RunStatus::Exited { code },
            None => RunStatus::Terminated,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Exited { code } => write!(f, "exit code {code}"),
            RunStatus::Terminated => write!(f, "terminated by signal"),
        }
    }
}

/// One execution of the transfer command. Reported, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRun {
    pub command_line: String,
    pub status: RunStatus,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl SyncRun {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
