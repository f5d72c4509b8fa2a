//! Fixed-rate repeating task runner
//!
//! A ticker thread fires every `interval` and hands each firing to its own
//! worker thread, so a slow firing never delays the schedule. Skipping a
//! firing while the previous one runs is the task's job (see `SyncTrigger`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::warn;

/// Granularity at which the ticker notices cancellation
const POLL_SLICE: Duration = Duration::from_millis(25);

pub struct Scheduler {
    stop: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Run `task` every `interval` until `running` is cleared or the
    /// scheduler is dropped.
    pub fn every<F>(
        name: &str,
        interval: Duration,
        running: Arc<AtomicBool>,
        task: F,
    ) -> std::io::Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let task = Arc::new(task);
        let worker_name = format!("{name}-worker");

        let ticker = {
            let stop = Arc::clone(&stop);
            thread::Builder::new().name(name.to_string()).spawn(move || {
                let mut next = Instant::now() + interval;
                loop {
                    if !sleep_until(next, &running, &stop) {
                        return;
                    }
                    next += interval;

                    let task = Arc::clone(&task);
                    if let Err(e) = thread::Builder::new()
                        .name(worker_name.clone())
                        .spawn(move || task())
                    {
                        warn!("failed to spawn tick worker: {e}");
                    }

                    // Fell behind (e.g. suspended laptop): realign instead of bursting
                    let now = Instant::now();
                    if next < now {
                        next = now + interval;
                    }
                }
            })?
        };

        Ok(Self {
            stop,
            ticker: Some(ticker),
        })
    }

    /// Stop firing and wait for the ticker thread. In-flight workers are
    /// left to finish on their own.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Sleep until `deadline`; returns false if cancelled first.
fn sleep_until(deadline: Instant, running: &AtomicBool, stop: &AtomicBool) -> bool {
    loop {
        if !running.load(Ordering::SeqCst) || stop.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(POLL_SLICE));
    }
}
