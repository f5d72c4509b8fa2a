//! Configuration module for Autosync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (AUTOSYNC_*)
//! 3. Project config (`./autosync.toml`, or `--config <file>`)
//! 4. User config (~/.config/autosync/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{
    load_layered, load_with_warnings, parse_with_warnings, user_config_path, with_env_overrides,
    ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{
    ColorMode, Config, LocalConfig, OutputConfig, RemoteConfig, SyncConfig, WatchConfig,
};
