//! Autosync CLI - mirror a local directory to a remote host on every change
//!
//! Usage: autosync <COMMAND>
//!
//! Commands:
//!   sync     Initial sync, then sync whenever the local directory changes
//!   check    Validate the job and required programs
//!   command  Print the rsync command line

use std::process::ExitCode;

use autosync::presentation::Cli;
use clap::Parser;
use tracing::Level;

mod commands;
mod ui;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", ui::error::format_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `--json` keeps stdout to NDJSON events.
/// Per-target `RUST_LOG` directives are honored alongside the verbosity level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
