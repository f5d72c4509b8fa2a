//! Presentation Layer
//!
//! CLI argument parsing (via clap). Rendering lives in the binary's `ui`
//! module; this layer only defines what the user can ask for.

pub mod cli;

pub use cli::{Cli, ColorWhen, Commands, JobArgs};
