use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use autosync::SyncEvent;

pub fn render_sync_header(
    local_dir: &str,
    target: &str,
    backend: &str,
    interval_ms: u128,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "Autosync");
    header.add("Local", local_dir);
    header.add("Remote", target);
    header.add("Watcher", backend);
    header.add("Interval", format!("{interval_ms}ms"));
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_sync_event(
    timestamp: &str,
    event: &SyncEvent,
    verbose: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let label = |baseline: bool| if baseline { "Initial sync" } else { "Sync" };

    match event {
        SyncEvent::WatchStarted { local_dir, backend } => format!(
            "{} {} Watching: {} ({})\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            local_dir,
            backend
        ),
        SyncEvent::ChangesDetected { content } => {
            let mut out = String::new();
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                out.push_str(&format!(
                    "{} {} {}\n",
                    prefix,
                    Icon::Arrow.colored(supports_color, supports_unicode),
                    line
                ));
            }
            out
        }
        SyncEvent::SyncStarted {
            command_line,
            baseline,
        } => {
            let mut out = format!(
                "{} {} {}...\n",
                prefix,
                Icon::Progress.colored(supports_color, supports_unicode),
                label(*baseline)
            );
            if verbose {
                out.push_str(&format!(
                    "{} {} {}\n",
                    prefix,
                    Icon::Arrow.colored(supports_color, supports_unicode),
                    ColoredText::dim(command_line.as_str()).render(supports_color)
                ));
            }
            out
        }
        SyncEvent::SyncFinished {
            success,
            code,
            elapsed_ms,
            baseline,
        } => {
            if *success {
                format!(
                    "{} {} {} done in {}ms\n",
                    prefix,
                    Icon::Success.colored(supports_color, supports_unicode),
                    label(*baseline),
                    elapsed_ms
                )
            } else {
                let status = match code {
                    Some(code) => format!("exit code {code}"),
                    None => "terminated by signal".to_string(),
                };
                format!(
                    "{} {} {} failed: {}\n",
                    prefix,
                    Icon::Warning.colored(supports_color, supports_unicode),
                    label(*baseline),
                    ColoredText::warning(status).render(supports_color)
                )
            }
        }
        SyncEvent::WatchFailed { message } => format!(
            "{} {} Watch stopped: {} (syncing continues)\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(message.as_str()).render(supports_color)
        ),
        SyncEvent::SyncError { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(message.as_str()).render(supports_color)
        ),
        SyncEvent::Shutdown => format!(
            "\n{} {} Sync stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        ),
    }
}
