//! Common test utilities for autosync CLI tests.
//!
//! `TestEnv` gives every test an isolated project directory, local source
//! directory and HOME, and runs the binary with `AUTOSYNC_*` variables
//! scrubbed from the inherited environment.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const SCRUBBED_ENV: &[&str] = &[
    "AUTOSYNC_LOCAL_DIR",
    "AUTOSYNC_REMOTE_DIR",
    "AUTOSYNC_REMOTE_HOST",
    "AUTOSYNC_REMOTE_PORT",
    "AUTOSYNC_REMOTE_USER",
    "AUTOSYNC_EXTRA_PARAMS",
    "AUTOSYNC_INTERVAL_MS",
    "AUTOSYNC_DRY_RUN",
    "AUTOSYNC_WATCHER",
    "RUST_LOG",
];

/// Result of running an autosync CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Parse every stdout line as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({e}): {l}")))
            .collect()
    }

    /// Names of the `event` fields in NDJSON output, in order
    pub fn event_names(&self) -> Vec<String> {
        self.json_lines()
            .iter()
            .filter_map(|v| v["event"].as_str().map(str::to_string))
            .collect()
    }
}

/// Isolated test environment
pub struct TestEnv {
    /// Working directory the CLI runs in (holds `autosync.toml`)
    pub project_root: TempDir,
    /// HOME / XDG config home, so no user config leaks in
    pub home_dir: TempDir,
    /// Directory that gets synced
    pub local_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let project_root = tempfile::tempdir().unwrap();
        let home_dir = tempfile::tempdir().unwrap();
        let local_dir = project_root.path().join("app");
        fs::create_dir_all(&local_dir).unwrap();
        Self {
            project_root,
            home_dir,
            local_dir,
        }
    }

    /// Write `autosync.toml` in the project root
    pub fn write_config(&self, content: &str) {
        fs::write(self.project_root.path().join("autosync.toml"), content).unwrap();
    }

    /// A complete job config pointing at `local_dir`, transferring with `rsync_program`
    pub fn write_job_config(&self, rsync_program: &str) {
        self.write_config(&format!(
            r#"
[local]
dir = "{}"

[remote]
host = "devbox"
port = 2222
user = "deploy"
dir = "/srv/app"

[sync]
rsync_program = "{}"
"#,
            self.local_dir.display(),
            rsync_program
        ));
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_autosync"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path())
            .env("NO_COLOR", "1")
            .env("TERM", "dumb")
            .stdin(Stdio::null());
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        TestResult::from_output(cmd.output().expect("failed to execute autosync"))
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn local_path(&self) -> &Path {
        &self.local_dir
    }
}
