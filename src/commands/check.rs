use anyhow::{bail, Result};
use autosync::config::{Config, ConfigWarning};
use autosync::sync::{check_available, remote_shell_program};
use autosync::WatchBackend;

use super::Globals;
use crate::ui::blocks::check_item::{CheckItem, CheckStatus};
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;
use crate::ui::views::check::render_check;

pub fn cmd_check(globals: &Globals<'_>, config: Config, warnings: &[ConfigWarning]) -> Result<()> {
    let ui = UiContext::new(globals.json, globals.verbose, globals.color, &config);
    print_config_warnings(warnings, ui.color, ui.unicode);

    let items = run_checks(&config);
    let failed = items
        .iter()
        .filter(|i| i.status == CheckStatus::Error)
        .count();

    if ui.json {
        let checks: Vec<_> = items
            .iter()
            .map(|i| {
                serde_json::json!({
                    "name": i.name,
                    "status": match i.status {
                        CheckStatus::Pass => "pass",
                        CheckStatus::Warning => "warning",
                        CheckStatus::Error => "error",
                    },
                    "message": i.message,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "command": "check",
                "passed": failed == 0,
                "checks": checks,
            })
        );
    } else {
        print!("{}", render_check(&items, ui.color, ui.unicode));
    }

    if failed > 0 {
        bail!("{failed} check(s) failed");
    }
    Ok(())
}

fn run_checks(config: &Config) -> Vec<CheckItem> {
    let mut items = Vec::new();

    let job = config.to_job().and_then(|job| job.validate().map(|_| job));
    let (rsync, ssh) = match &job {
        Ok(job) => {
            items.push(CheckItem {
                name: "job".to_string(),
                status: CheckStatus::Pass,
                message: format!("{} -> {}", job.local_dir.display(), job.remote_target()),
                recommendation: None,
            });
            (job.rsync_program.clone(), job.ssh_program.clone())
        }
        Err(e) => {
            items.push(CheckItem {
                name: "job".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
                recommendation: Some("Pass the missing flags or add them to autosync.toml".to_string()),
            });
            (
                config
                    .sync
                    .rsync_program
                    .clone()
                    .unwrap_or_else(|| autosync::domain::DEFAULT_RSYNC_PROGRAM.to_string()),
                config
                    .sync
                    .ssh_program
                    .clone()
                    .unwrap_or_else(|| autosync::domain::DEFAULT_SSH_PROGRAM.to_string()),
            )
        }
    };

    if let Err(e) = config.trigger_options() {
        items.push(CheckItem {
            name: "interval".to_string(),
            status: CheckStatus::Error,
            message: e.to_string(),
            recommendation: None,
        });
    }

    items.push(program_check(&rsync, "--version", "transfer program", None));
    items.push(program_check(remote_shell_program(&ssh), "-V", "remote shell", None));

    let backend = config.watch_backend();
    match backend.required_program(&config.watch.command) {
        Some(program) => {
            let hint = (backend == WatchBackend::Fswatch)
                .then(|| "Install fswatch or use --watcher native".to_string());
            items.push(program_check(&program, "--version", "watch backend", hint));
        }
        None if backend == WatchBackend::Command => items.push(CheckItem {
            name: "watcher".to_string(),
            status: CheckStatus::Error,
            message: "no watch command configured".to_string(),
            recommendation: Some("Set `[watch] command = [...]` in autosync.toml".to_string()),
        }),
        None => items.push(CheckItem {
            name: "watcher".to_string(),
            status: CheckStatus::Pass,
            message: format!("{backend} (built in)"),
            recommendation: None,
        }),
    }

    items
}

fn program_check(program: &str, version_flag: &str, role: &str, hint: Option<String>) -> CheckItem {
    if check_available(program, version_flag) {
        CheckItem {
            name: program.to_string(),
            status: CheckStatus::Pass,
            message: format!("{role} found"),
            recommendation: None,
        }
    } else {
        CheckItem {
            name: program.to_string(),
            status: CheckStatus::Error,
            message: format!("{role} not found on PATH"),
            recommendation: hint,
        }
    }
}
