//! Error types for Autosync
//!
//! Library code returns `thiserror` enums; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for Autosync operations
pub type AutosyncResult<T> = Result<T, AutosyncError>;

/// Main error type for Autosync operations
#[derive(Error, Debug)]
pub enum AutosyncError {
    /// A required job parameter is missing or malformed
    #[error("invalid sync job: {field} {reason}")]
    InvalidJob { field: &'static str, reason: String },

    /// Local directory to watch does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// An `AUTOSYNC_*` override could not be parsed
    #[error("invalid environment override {key}={value:?}: {reason}")]
    InvalidEnv {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Watch session failed
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Transfer command could not be run
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Failure of a watch session.
///
/// Any of these ends the session: no further changes will be observed.
#[derive(Error, Debug)]
pub enum WatchError {
    /// The watch program could not be launched
    #[error("failed to start watch program '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The watch program exited while it was expected to keep running
    #[error("watch program exited unexpectedly ({status})")]
    Exited { status: ExitStatus },

    /// The watch program was started without a readable stdout
    #[error("watch program has no stdout")]
    NoStdout,

    /// The native watch backend failed
    #[error("native watcher error: {0}")]
    Backend(String),

    /// Waiting on the watch program failed
    #[error("failed to wait on watch program: {0}")]
    Wait(#[source] std::io::Error),
}

/// Failure to run the transfer command at all.
///
/// A transfer that runs and exits non-zero is not an error; see `SyncRun`.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to launch transfer command: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}
