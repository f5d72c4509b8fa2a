//! Pending-change accumulator shared by the watcher and the sync trigger.
//!
//! The text is diagnostic only. What matters is whether anything is pending.

use std::sync::{PoisonError, RwLock};

/// Thread-safe, append-only record of changes observed since the last drain.
#[derive(Debug, Default)]
pub struct ChangeBuffer {
    inner: RwLock<String>,
}

impl ChangeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notification to the pending record.
    pub fn append(&self, text: &str) {
        let mut buf = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        buf.push_str(text);
    }

    /// Put `text` back in front of whatever is pending.
    pub fn prepend(&self, text: &str) {
        let mut buf = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        buf.insert_str(0, text);
    }

    /// Take everything pending and reset the buffer, in one critical section.
    ///
    /// Returns `None` when the buffer is empty or whitespace-only. A
    /// whitespace-only buffer is reset as well.
    pub fn drain_if_non_empty(&self) -> Option<String> {
        let mut buf = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let content = std::mem::take(&mut *buf);
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == content.len() {
            Some(content)
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Whether a drain right now would return content.
    pub fn is_pending(&self) -> bool {
        let buf = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        !buf.trim().is_empty()
    }

    /// Raw byte length of the pending record.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
