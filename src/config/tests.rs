//! Tests for the config module

use super::loader::{apply_env, load_layered, parse_with_warnings};
use super::types::*;
use crate::error::AutosyncError;
use crate::watcher::WatchBackend;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

const FULL_CONFIG: &str = r#"
[local]
dir = "/home/dev/app/"

[remote]
host = "DevCloud"
port = 36000
user = "root"
dir = "/root/workspace/app"

[sync]
interval_ms = 1000
extra_params = "--exclude .git"
requeue_on_failure = true

[watch]
backend = "command"
command = ["inotifywait", "-mrq", "{dir}"]

[output]
color = "never"
"#;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.watch_backend(), WatchBackend::Fswatch);
    assert_eq!(config.color(), ColorMode::Auto);
    assert!(config.unicode());

    let trigger = config.trigger_options().unwrap();
    assert_eq!(trigger.interval, Duration::from_millis(500));
    assert!(!trigger.requeue_on_failure);
}

#[test]
fn test_config_parse_toml() {
    let config: Config = toml::from_str(FULL_CONFIG).unwrap();

    assert_eq!(config.remote.port, Some(36000));
    assert_eq!(config.watch_backend(), WatchBackend::Command);
    assert_eq!(config.watch.command.len(), 3);
    assert_eq!(config.color(), ColorMode::Never);

    let job = config.to_job().unwrap();
    assert_eq!(job.local_dir, PathBuf::from("/home/dev/app/"));
    assert_eq!(job.remote_target(), "root@DevCloud:/root/workspace/app");
    assert_eq!(job.extra_params.as_deref(), Some("--exclude .git"));
    assert_eq!(job.rsync_program, "rsync");
    assert_eq!(job.ssh_program, "ssh");

    let trigger = config.trigger_options().unwrap();
    assert_eq!(trigger.interval, Duration::from_secs(1));
    assert!(trigger.requeue_on_failure);
}

#[test]
fn test_missing_required_field_is_validation_error() {
    let config: Config = toml::from_str("[remote]\nhost = \"h\"\nuser = \"u\"\ndir = \"/d\"\n").unwrap();
    match config.to_job() {
        Err(AutosyncError::InvalidJob { field, .. }) => assert_eq!(field, "local_dir"),
        other => panic!("expected InvalidJob, got {other:?}"),
    }
}

#[test]
fn test_missing_port_is_validation_error() {
    let config: Config = toml::from_str(
        "[local]\ndir = \"/a\"\n[remote]\nhost = \"h\"\nuser = \"u\"\ndir = \"/d\"\n",
    )
    .unwrap();
    assert!(matches!(
        config.to_job(),
        Err(AutosyncError::InvalidJob {
            field: "remote_port",
            ..
        })
    ));
}

#[test]
fn test_zero_interval_rejected() {
    let config: Config = toml::from_str("[sync]\ninterval_ms = 0\n").unwrap();
    assert!(matches!(
        config.trigger_options(),
        Err(AutosyncError::InvalidJob {
            field: "interval_ms",
            ..
        })
    ));
}

#[test]
fn test_unknown_keys_produce_warnings() {
    let content = "[remote]\nhots = \"DevCloud\"\n";
    let (_, warnings) = parse_with_warnings(content, Path::new("autosync.toml")).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "hots");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("host"));
    assert_eq!(
        warnings[0].to_string(),
        "unknown config key 'hots' in autosync.toml:2 (did you mean 'host'?)"
    );
}

#[test]
fn test_invalid_toml_is_config_error() {
    let err = parse_with_warnings("[remote\nhost=", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, AutosyncError::InvalidConfig { .. }));
}

#[test]
fn test_merge_prefers_overlay() {
    let base: Config = toml::from_str(FULL_CONFIG).unwrap();
    let overlay: Config = toml::from_str("[remote]\nport = 2222\n[watch]\nbackend = \"native\"\n").unwrap();
    let merged = base.merge(overlay);

    assert_eq!(merged.remote.port, Some(2222));
    assert_eq!(merged.remote.host.as_deref(), Some("DevCloud"));
    assert_eq!(merged.watch_backend(), WatchBackend::Native);
    assert_eq!(merged.watch.command.len(), 3);
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("AUTOSYNC_REMOTE_HOST", "staging"),
        ("AUTOSYNC_REMOTE_PORT", "2200"),
        ("AUTOSYNC_WATCHER", "notify"),
        ("AUTOSYNC_DRY_RUN", "1"),
    ]
    .into_iter()
    .collect();

    let base: Config = toml::from_str(FULL_CONFIG).unwrap();
    let config = apply_env(base, |k| env.get(k).map(|v| v.to_string())).unwrap();

    assert_eq!(config.remote.host.as_deref(), Some("staging"));
    assert_eq!(config.remote.port, Some(2200));
    assert_eq!(config.sync.interval_ms, Some(1000));
    assert_eq!(config.watch_backend(), WatchBackend::Native);
    assert_eq!(config.sync.dry_run, Some(true));
}

#[test]
fn test_unparseable_env_port_is_error() {
    let base: Config = toml::from_str(FULL_CONFIG).unwrap();
    let err = apply_env(base, |k| (k == "AUTOSYNC_REMOTE_PORT").then(|| "2222x".to_string()))
        .unwrap_err();

    match err {
        AutosyncError::InvalidEnv { key, value, .. } => {
            assert_eq!(key, "AUTOSYNC_REMOTE_PORT");
            assert_eq!(value, "2222x");
        }
        other => panic!("expected InvalidEnv, got {other:?}"),
    }
}

#[test]
fn test_unparseable_env_interval_is_error() {
    let base: Config = toml::from_str(FULL_CONFIG).unwrap();
    let result = apply_env(base, |k| (k == "AUTOSYNC_INTERVAL_MS").then(|| "soon".to_string()));

    assert!(matches!(
        result,
        Err(AutosyncError::InvalidEnv {
            key: "AUTOSYNC_INTERVAL_MS",
            ..
        })
    ));
}

#[test]
fn test_load_layered_reads_project_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("autosync.toml"), FULL_CONFIG).unwrap();

    let (config, warnings) = load_layered(None, dir.path()).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(config.remote.user.as_deref(), Some("root"));
}

#[test]
fn test_load_layered_explicit_missing_file_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_layered(Some(&missing), dir.path()),
        Err(AutosyncError::Io(_))
    ));
}
