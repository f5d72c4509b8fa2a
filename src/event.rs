//! Events emitted while syncing, rendered by the CLI or printed as NDJSON

use std::sync::Arc;

use serde::Serialize;

/// Callback receiving events. Invoked from the watch, ticker and worker threads.
pub type EventSink = Arc<dyn Fn(SyncEvent) + Send + Sync>;

/// A sink that drops every event
pub fn discard() -> EventSink {
    Arc::new(|_| {})
}

/// Sync event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    /// Watch session started
    WatchStarted { local_dir: String, backend: String },
    /// A tick drained pending changes
    ChangesDetected { content: String },
    /// Transfer command about to run
    SyncStarted { command_line: String, baseline: bool },
    /// Transfer command finished (successfully or not)
    SyncFinished {
        success: bool,
        code: Option<i32>,
        elapsed_ms: u64,
        baseline: bool,
    },
    /// Watch session ended; no further changes will be observed
    WatchFailed { message: String },
    /// Transfer command could not be launched
    SyncError { message: String },
    /// Cancellation observed
    Shutdown,
}

impl SyncEvent {
    /// Convert to JSON string with "command": "sync" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("sync"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Whether this event reports a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SyncEvent::WatchFailed { .. }
                | SyncEvent::SyncError { .. }
                | SyncEvent::SyncFinished { success: false, .. }
        )
    }
}
