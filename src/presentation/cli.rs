//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - Job flags override config files and `AUTOSYNC_*` environment variables

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::watcher::WatchBackend;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Autosync - watch a directory and mirror it to a remote host with rsync
#[derive(Parser, Debug)]
#[command(name = "autosync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit events as NDJSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./autosync.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync once, then keep syncing whenever the local directory changes
    Sync {
        #[command(flatten)]
        job: JobArgs,

        /// Tick interval in milliseconds
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,

        /// Watch backend
        #[arg(long, value_enum)]
        watcher: Option<WatchBackend>,

        /// Keep changes pending when a transfer fails
        #[arg(long)]
        requeue_on_failure: bool,

        /// Run the initial sync only, then exit
        #[arg(long)]
        once: bool,
    },

    /// Check that the job validates and required programs are installed
    Check {
        #[command(flatten)]
        job: JobArgs,

        /// Watch backend
        #[arg(long, value_enum)]
        watcher: Option<WatchBackend>,
    },

    /// Print the transfer command line without running it
    Command {
        #[command(flatten)]
        job: JobArgs,
    },
}

/// Flags describing the sync job
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct JobArgs {
    /// Local directory to watch
    #[arg(long, value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Destination directory on the remote host
    #[arg(long, value_name = "DIR")]
    pub remote_dir: Option<String>,

    /// Remote host name or address
    #[arg(long, value_name = "HOST")]
    pub remote_host: Option<String>,

    /// Remote ssh port
    #[arg(long, value_name = "PORT")]
    pub remote_port: Option<u16>,

    /// Remote login user
    #[arg(long, value_name = "USER")]
    pub remote_user: Option<String>,

    /// Extra parameters appended verbatim to the rsync command line
    #[arg(long, value_name = "PARAMS", allow_hyphen_values = true)]
    pub extra_params: Option<String>,

    /// Transfer program (default: rsync)
    #[arg(long, value_name = "PROGRAM")]
    pub rsync_program: Option<String>,

    /// Remote shell program (default: ssh)
    #[arg(long, value_name = "PROGRAM")]
    pub ssh_program: Option<String>,

    /// Pass --dry-run to rsync
    #[arg(long)]
    pub dry_run: bool,
}

impl JobArgs {
    /// Overlay these flags on `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.local_dir {
            config.local.dir = Some(dir.clone());
        }
        if let Some(dir) = &self.remote_dir {
            config.remote.dir = Some(dir.clone());
        }
        if let Some(host) = &self.remote_host {
            config.remote.host = Some(host.clone());
        }
        if let Some(port) = self.remote_port {
            config.remote.port = Some(port);
        }
        if let Some(user) = &self.remote_user {
            config.remote.user = Some(user.clone());
        }
        if let Some(extra) = &self.extra_params {
            config.sync.extra_params = Some(extra.clone());
        }
        if let Some(program) = &self.rsync_program {
            config.sync.rsync_program = Some(program.clone());
        }
        if let Some(program) = &self.ssh_program {
            config.sync.ssh_program = Some(program.clone());
        }
        if self.dry_run {
            config.sync.dry_run = Some(true);
        }
        config
    }
}
