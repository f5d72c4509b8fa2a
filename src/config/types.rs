//! Configuration type definitions
//!
//! Every leaf is optional so that layers (user file, project file, env, CLI)
//! can be merged field by field. Defaults are applied when building the job.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{SyncJobSpec, DEFAULT_RSYNC_PROGRAM, DEFAULT_SSH_PROGRAM};
use crate::error::{AutosyncError, AutosyncResult};
use crate::sync::{TriggerOptions, DEFAULT_INTERVAL_MS};
use crate::watcher::WatchBackend;

use super::loader::{self, ConfigWarning};

/// Local side of the job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Remote side of the job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Transfer and trigger settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsync_program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requeue_on_failure: Option<bool>,
}

/// Watch backend settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<WatchBackend>,
    /// argv for the `command` backend; `{dir}` is replaced by the local dir
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
}

/// Color mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode: Option<bool>,
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AutosyncResult<Self> {
        Self::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> AutosyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(mut self, other: Config) -> Config {
        fn take<T>(base: &mut Option<T>, over: Option<T>) {
            if over.is_some() {
                *base = over;
            }
        }

        take(&mut self.local.dir, other.local.dir);
        take(&mut self.remote.host, other.remote.host);
        take(&mut self.remote.port, other.remote.port);
        take(&mut self.remote.user, other.remote.user);
        take(&mut self.remote.dir, other.remote.dir);
        take(&mut self.sync.interval_ms, other.sync.interval_ms);
        take(&mut self.sync.extra_params, other.sync.extra_params);
        take(&mut self.sync.rsync_program, other.sync.rsync_program);
        take(&mut self.sync.ssh_program, other.sync.ssh_program);
        take(&mut self.sync.dry_run, other.sync.dry_run);
        take(&mut self.sync.requeue_on_failure, other.sync.requeue_on_failure);
        take(&mut self.watch.backend, other.watch.backend);
        if !other.watch.command.is_empty() {
            self.watch.command = other.watch.command;
        }
        take(&mut self.output.color, other.output.color);
        take(&mut self.output.unicode, other.output.unicode);
        self
    }

    /// Build the job. Missing required values are startup validation errors.
    pub fn to_job(&self) -> AutosyncResult<SyncJobSpec> {
        let local_dir = required("local_dir", self.local.dir.clone())?;
        let remote_dir = required("remote_dir", self.remote.dir.clone())?;
        let remote_host = required("remote_host", self.remote.host.clone())?;
        let remote_user = required("remote_user", self.remote.user.clone())?;
        let remote_port = required("remote_port", self.remote.port)?;

        let job = SyncJobSpec::new(local_dir, remote_dir, remote_host, remote_port, remote_user)
            .with_extra_params(self.sync.extra_params.clone().unwrap_or_default())
            .with_rsync_program(
                self.sync
                    .rsync_program
                    .clone()
                    .unwrap_or_else(|| DEFAULT_RSYNC_PROGRAM.to_string()),
            )
            .with_ssh_program(
                self.sync
                    .ssh_program
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SSH_PROGRAM.to_string()),
            )
            .with_dry_run(self.sync.dry_run.unwrap_or(false));
        Ok(job)
    }

    /// Trigger options with defaults applied
    pub fn trigger_options(&self) -> AutosyncResult<TriggerOptions> {
        let interval_ms = self.sync.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS);
        if interval_ms == 0 {
            return Err(AutosyncError::InvalidJob {
                field: "interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(TriggerOptions::default()
            .with_interval(Duration::from_millis(interval_ms))
            .with_requeue_on_failure(self.sync.requeue_on_failure.unwrap_or(false)))
    }

    pub fn watch_backend(&self) -> WatchBackend {
        self.watch.backend.unwrap_or_default()
    }

    pub fn color(&self) -> ColorMode {
        self.output.color.unwrap_or_default()
    }

    pub fn unicode(&self) -> bool {
        self.output.unicode.unwrap_or(true)
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> AutosyncResult<T> {
    value.ok_or_else(|| AutosyncError::InvalidJob {
        field,
        reason: "is required".to_string(),
    })
}
