//! Subcommand handlers for the autosync binary

pub mod check;
pub mod command;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use autosync::config::{self, Config, ConfigWarning};
use autosync::presentation::{Cli, Commands, JobArgs};

pub fn dispatch(cli: Cli) -> Result<()> {
    let globals = Globals {
        json: cli.json,
        verbose: cli.verbose,
        color: cli.color,
        config: cli.config.as_deref(),
    };

    match &cli.command {
        Commands::Sync {
            job,
            interval_ms,
            watcher,
            requeue_on_failure,
            once,
        } => {
            let (mut config, warnings) = resolve_config(&globals, job)?;
            if let Some(ms) = interval_ms {
                config.sync.interval_ms = Some(*ms);
            }
            if let Some(backend) = watcher {
                config.watch.backend = Some(*backend);
            }
            if *requeue_on_failure {
                config.sync.requeue_on_failure = Some(true);
            }
            sync::cmd_sync(&globals, config, &warnings, *once)
        }
        Commands::Check { job, watcher } => {
            let (mut config, warnings) = resolve_config(&globals, job)?;
            if let Some(backend) = watcher {
                config.watch.backend = Some(*backend);
            }
            check::cmd_check(&globals, config, &warnings)
        }
        Commands::Command { job } => {
            let (config, warnings) = resolve_config(&globals, job)?;
            command::cmd_command(&globals, config, &warnings)
        }
    }
}

/// Global flags shared by every subcommand
pub struct Globals<'a> {
    pub json: bool,
    pub verbose: u8,
    pub color: Option<autosync::presentation::ColorWhen>,
    pub config: Option<&'a Path>,
}

/// Layered config with the job flags applied on top
fn resolve_config(globals: &Globals<'_>, job: &JobArgs) -> Result<(Config, Vec<ConfigWarning>)> {
    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let (config, warnings) = config::load_layered(globals.config, &cwd)?;
    Ok((job.apply(config), warnings))
}
