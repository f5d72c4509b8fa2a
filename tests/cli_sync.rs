#![cfg(unix)]

mod common;

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use common::TestEnv;

#[test]
fn test_once_runs_single_baseline_sync() {
    let env = TestEnv::new();
    env.write_job_config("true");

    let result = env.run(&["--json", "sync", "--once"]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert_eq!(result.event_names(), vec!["sync_started", "sync_finished"]);

    let lines = result.json_lines();
    assert_eq!(lines[0]["baseline"], true);
    assert_eq!(lines[0]["command"], "sync");
    let command_line = lines[0]["command_line"].as_str().unwrap();
    assert!(command_line.starts_with("true --delete -avz -e 'ssh -p 2222' "));
    assert!(command_line.ends_with(" deploy@devbox:/srv/app"));
    assert_eq!(lines[1]["success"], true);
    assert_eq!(lines[1]["code"], 0);
}

#[test]
fn test_once_fails_when_transfer_fails() {
    let env = TestEnv::new();
    env.write_job_config("false");

    let result = env.run(&["--json", "sync", "--once"]);

    assert!(!result.success);
    let lines = result.json_lines();
    assert_eq!(lines[1]["event"], "sync_finished");
    assert_eq!(lines[1]["success"], false);
    assert_eq!(lines[1]["code"], 1);
    assert!(result.stderr.contains("initial sync failed"));
}

#[test]
fn test_invalid_job_never_syncs() {
    let env = TestEnv::new();
    let result = env.run(&[
        "--json",
        "sync",
        "--once",
        "--local-dir",
        env.local_path().to_str().unwrap(),
        "--remote-dir",
        "/srv/app",
        "--remote-user",
        "deploy",
        "--rsync-program",
        "true",
    ]);

    assert!(!result.success);
    assert!(result.stdout.is_empty(), "unexpected events:\n{}", result.stdout);
    assert!(result.stderr.contains("remote_host is required"));
}

#[test]
fn test_missing_local_dir_is_rejected() {
    let env = TestEnv::new();
    env.write_job_config("true");
    let missing = env.project_path("missing");

    let result = env.run(&["sync", "--once", "--local-dir", missing.to_str().unwrap()]);

    assert!(!result.success);
    assert!(result.stderr.contains("directory not found"));
}

#[test]
fn test_zero_interval_is_rejected() {
    let env = TestEnv::new();
    env.write_job_config("true");

    let result = env.run(&["sync", "--interval-ms", "0"]);

    assert!(!result.success);
    assert!(result.stderr.contains("interval_ms must be greater than zero"));
}

#[test]
fn test_human_output_once() {
    let env = TestEnv::new();
    env.write_job_config("true");

    let result = env.run(&["sync", "--once", "--color", "never"]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(result.stdout.contains("[~] Autosync"));
    assert!(result.stdout.contains("Remote: deploy@devbox:/srv/app"));
    assert!(result.stdout.contains("Initial sync..."));
    assert!(result.stdout.contains("[OK] Initial sync done in"));
}

/// Full run: baseline, a change picked up by the native watcher, then Ctrl+C.
#[test]
fn test_change_triggers_sync_until_interrupted() {
    let env = TestEnv::new();
    env.write_job_config("true");

    let mut child = env
        .command(&["--json", "sync", "--watcher", "native", "--interval-ms", "100"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let stdout = child.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel::<serde_json::Value>();
    let reader = thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if let Ok(value) = serde_json::from_str(&line) {
                if tx.send(value).is_err() {
                    break;
                }
            }
        }
    });

    let mut seen: Vec<serde_json::Value> = Vec::new();
    let mut wait_for = |pred: &dyn Fn(&[serde_json::Value]) -> bool| {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !pred(&seen) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(event) => seen.push(event),
                Err(_) => return false,
            }
        }
        true
    };

    let count = |events: &[serde_json::Value], name: &str| {
        events.iter().filter(|e| e["event"] == name).count()
    };

    assert!(wait_for(&|e| count(e, "watch_started") == 1 && count(e, "sync_finished") == 1));
    // Give the watcher time to register before touching the tree
    thread::sleep(Duration::from_millis(300));
    std::fs::write(env.local_path().join("main.rs"), "fn main() {}\n").unwrap();

    assert!(wait_for(&|e| count(e, "changes_detected") >= 1 && count(e, "sync_finished") >= 2));

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let exit = child.wait().unwrap();
    reader.join().unwrap();
    seen.extend(rx.try_iter());

    assert!(exit.success());
    assert!(seen.iter().any(|e| e["event"] == "shutdown"));

    let change_sync = seen
        .iter()
        .filter(|e| e["event"] == "sync_started")
        .nth(1)
        .unwrap();
    assert_eq!(change_sync["baseline"], false);
}
