use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use autosync::config::{Config, ConfigWarning};
use autosync::{EventSink, RsyncExecutor, Supervisor, SupervisorOptions, SyncEvent, WatchBackend};

use super::Globals;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;
use crate::ui::views::sync::{render_sync_event, render_sync_header};

pub fn cmd_sync(
    globals: &Globals<'_>,
    config: Config,
    warnings: &[ConfigWarning],
    once: bool,
) -> Result<()> {
    let ui = UiContext::new(globals.json, globals.verbose, globals.color, &config);
    print_config_warnings(warnings, ui.color, ui.unicode);

    let job = config.to_job()?;
    let trigger = config.trigger_options()?;
    let backend = config.watch_backend();
    let source = backend.source(&config.watch.command).ok_or_else(|| {
        anyhow!("the '{}' watcher needs `[watch] command = [...]` in autosync.toml", WatchBackend::Command)
    })?;

    let failed = Arc::new(AtomicBool::new(false));
    let events = event_sink(ui, Arc::clone(&failed));

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    if !ui.json {
        print!(
            "{}",
            render_sync_header(
                &job.local_dir.display().to_string(),
                &job.remote_target(),
                &backend.to_string(),
                trigger.interval.as_millis(),
                ui.color,
                ui.unicode
            )
        );
    }

    let options = SupervisorOptions::default()
        .with_trigger(trigger)
        .with_once(once);
    let supervisor = Supervisor::with_parts(job, options, Box::new(RsyncExecutor), source, events);
    supervisor.run(running)?;

    // A single run is scriptable, so its outcome is the exit status
    if once && failed.load(Ordering::SeqCst) {
        bail!("initial sync failed");
    }
    Ok(())
}

fn event_sink(ui: UiContext, failed: Arc<AtomicBool>) -> EventSink {
    Arc::new(move |event: SyncEvent| {
        if event.is_error() {
            failed.store(true, Ordering::SeqCst);
        }

        if ui.json {
            println!("{}", event.to_json());
            return;
        }

        let rendered = render_sync_event(
            &crate::ui::timestamp(),
            &event,
            ui.verbose > 0,
            ui.color,
            ui.unicode,
        );
        if event.is_error() {
            eprint!("{rendered}");
        } else {
            print!("{rendered}");
        }
    })
}
