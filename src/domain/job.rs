//! Sync job specification
//!
//! One `SyncJobSpec` describes one local directory mirrored to one remote
//! target. It is built and validated once at startup and never mutated.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{AutosyncError, AutosyncResult};

/// Default transfer program
pub const DEFAULT_RSYNC_PROGRAM: &str = "rsync";
/// Default remote shell program
pub const DEFAULT_SSH_PROGRAM: &str = "ssh";

/// Immutable description of a synchronization target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncJobSpec {
    /// Local directory to watch and mirror
    pub local_dir: PathBuf,
    /// Destination directory on the remote host
    pub remote_dir: String,
    /// Remote host name or address
    pub remote_host: String,
    /// Remote ssh port
    pub remote_port: u16,
    /// Remote login user
    pub remote_user: String,
    /// Extra parameters appended verbatim to the transfer command line
    pub extra_params: Option<String>,
    /// Transfer program
    pub rsync_program: String,
    /// Remote shell program passed to `rsync -e`
    pub ssh_program: String,
    /// Pass `--dry-run` to the transfer program
    pub dry_run: bool,
}

impl SyncJobSpec {
    /// Create a job with default programs and no extra parameters
    pub fn new(
        local_dir: impl Into<PathBuf>,
        remote_dir: impl Into<String>,
        remote_host: impl Into<String>,
        remote_port: u16,
        remote_user: impl Into<String>,
    ) -> Self {
        Self {
            local_dir: local_dir.into(),
            remote_dir: remote_dir.into(),
            remote_host: remote_host.into(),
            remote_port,
            remote_user: remote_user.into(),
            extra_params: None,
            rsync_program: DEFAULT_RSYNC_PROGRAM.to_string(),
            ssh_program: DEFAULT_SSH_PROGRAM.to_string(),
            dry_run: false,
        }
    }

    /// Set extra transfer parameters (blank input clears them)
    pub fn with_extra_params(mut self, extra: impl Into<String>) -> Self {
        let extra = extra.into();
        self.extra_params = if extra.trim().is_empty() {
            None
        } else {
            Some(extra)
        };
        self
    }

    /// Set the transfer program
    pub fn with_rsync_program(mut self, program: impl Into<String>) -> Self {
        self.rsync_program = program.into();
        self
    }

    /// Set the remote shell program
    pub fn with_ssh_program(mut self, program: impl Into<String>) -> Self {
        self.ssh_program = program.into();
        self
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// `user@host:path` destination
    pub fn remote_target(&self) -> String {
        format!(
            "{}@{}:{}",
            self.remote_user, self.remote_host, self.remote_dir
        )
    }

    /// Check every required field. Runs before any sync is attempted.
    pub fn validate(&self) -> AutosyncResult<()> {
        require_non_blank("local_dir", &self.local_dir.to_string_lossy())?;
        require_non_blank("remote_dir", &self.remote_dir)?;
        require_non_blank("remote_host", &self.remote_host)?;
        require_non_blank("remote_user", &self.remote_user)?;
        require_non_blank("rsync_program", &self.rsync_program)?;
        require_non_blank("ssh_program", &self.ssh_program)?;

        if self.remote_port == 0 {
            return Err(AutosyncError::InvalidJob {
                field: "remote_port",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.remote_host.chars().any(char::is_whitespace) {
            return Err(AutosyncError::InvalidJob {
                field: "remote_host",
                reason: "must not contain whitespace".to_string(),
            });
        }
        if self.remote_user.contains('@') || self.remote_user.chars().any(char::is_whitespace) {
            return Err(AutosyncError::InvalidJob {
                field: "remote_user",
                reason: "must not contain '@' or whitespace".to_string(),
            });
        }

        ensure_directory(&self.local_dir)
    }
}

fn require_non_blank(field: &'static str, value: &str) -> AutosyncResult<()> {
    if value.trim().is_empty() {
        return Err(AutosyncError::InvalidJob {
            field,
            reason: "is required".to_string(),
        });
    }
    Ok(())
}

fn ensure_directory(path: &Path) -> AutosyncResult<()> {
    if !path.is_dir() {
        return Err(AutosyncError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
