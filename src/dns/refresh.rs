//! Background refresh scheduler.
//!
//! One tokio task per caching resolver re-resolves every cached hostname on
//! a fixed period until it is told to stop. The task shares nothing with
//! foreground callers except the host cache.

use super::resolver::Shared;
use crate::base::neterror::NetError;
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Hostnames whose entry was replaced.
    pub refreshed: usize,
    /// Hostnames whose lookup failed; their previous entry is kept.
    pub failed: usize,
}

impl RefreshSummary {
    pub fn total(&self) -> usize {
        self.refreshed + self.failed
    }
}

/// Longest period the ticker is armed with. Longer intervals would overflow
/// the first deadline and never fire in practice anyway.
const MAX_PERIOD: Duration = Duration::from_secs(86400 * 365 * 30);

/// Handle to a running refresh task.
///
/// Stopping is one-way: once the stop signal is sent the sender is gone and
/// later calls find nothing to do.
pub(crate) struct Scheduler {
    stop_tx: Mutex<Option<watch::Sender<bool>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    /// Spawns the refresh loop on the current tokio runtime.
    pub(crate) fn spawn(shared: Arc<Shared>, period: Duration) -> Result<Self, NetError> {
        let runtime = Handle::try_current().map_err(|e| {
            tracing::debug!(error = %e, "refresh task needs a tokio runtime");
            NetError::NoAsyncRuntime
        })?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = runtime.spawn(run(shared, period, stop_rx));

        Ok(Self {
            stop_tx: Mutex::new(Some(stop_tx)),
            task: Mutex::new(Some(task)),
        })
    }

    /// Signals the loop to exit. Returns false if it was already stopped.
    pub(crate) fn stop(&self) -> bool {
        match self.stop_tx.lock().take() {
            Some(tx) => {
                // The receiver may already be gone if the runtime shut down.
                let _ = tx.send(true);
                true
            }
            None => false,
        }
    }

    /// True once stopped, or if the task has exited on its own.
    pub(crate) fn is_stopped(&self) -> bool {
        self.stop_tx
            .lock()
            .as_ref()
            .map_or(true, |tx| tx.is_closed())
    }

    /// Stops the loop and waits for the task to exit.
    pub(crate) async fn shutdown(&self) {
        self.stop();
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "DNS refresh task ended abnormally");
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(shared: Arc<Shared>, period: Duration, mut stop_rx: watch::Receiver<bool>) {
    let period = period.min(MAX_PERIOD);
    // First pass one full period after start, like a plain ticker.
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    shared.in_scope(|| tracing::debug!(?period, "DNS refresh task started"));

    loop {
        tokio::select! {
            biased;

            // Err means every sender is gone, which also means stop.
            _ = stop_rx.changed() => break,
            _ = ticker.tick() => {
                // Err means the sender is gone.
                let stopped = || stop_rx.has_changed().unwrap_or(true);
                shared.refresh_until(stopped).await;
                if stopped() {
                    break;
                }
                shared.notify_refreshed();
            }
        }
    }

    shared.in_scope(|| tracing::debug!("DNS refresh task stopped"));
}
