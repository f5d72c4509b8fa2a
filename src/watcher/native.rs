//! In-process watch backend using `notify`

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

use super::ChangeSource;
use crate::buffer::ChangeBuffer;
use crate::error::WatchError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Recursive watch via the platform's native notification API
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeWatch;

impl ChangeSource for NativeWatch {
    fn name(&self) -> &'static str {
        "native"
    }

    fn run(
        &self,
        local_dir: &Path,
        buffer: &Arc<ChangeBuffer>,
        running: &AtomicBool,
    ) -> Result<(), WatchError> {
        let sink = Arc::clone(buffer);
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    for path in event.paths {
                        sink.append(&format!("notify: file {} has changed.\n", path.display()));
                    }
                }
                Err(e) => warn!("native watcher reported an error: {e}"),
            },
            Config::default(),
        )
        .map_err(|e| WatchError::Backend(e.to_string()))?;

        watcher
            .watch(local_dir, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Backend(e.to_string()))?;

        while running.load(Ordering::SeqCst) {
            thread::sleep(POLL_INTERVAL);
        }
        Ok(())
    }
}
