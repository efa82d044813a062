//! Fixed-interval polling with an explicit stop handle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use inventory_core::result::AppResult;

/// What a poller has observed so far.
///
/// Fetches may overlap and complete out of order. Each carries the
/// sequence number it was issued with. Successes and failures keep separate
/// watermarks: a success is accepted when it is newer than the data shown,
/// even if a later fetch already failed, so the data never moves backwards
/// and is never held back by an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PollState<T> {
    /// Data from the newest successful fetch.
    pub data: Option<T>,
    /// Message of the newest failure, cleared by a newer success.
    pub error: Option<String>,
    /// Sequence number of the fetch behind `data`.
    pub applied_success: u64,
    /// Sequence number of the newest applied failure.
    pub applied_error: u64,
    /// Number of fetches issued.
    pub issued: u64,
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            applied_success: 0,
            applied_error: 0,
            issued: 0,
        }
    }
}

impl<T> PollState<T> {
    /// Applies a successful fetch. Returns whether the state changed.
    pub fn apply_success(&mut self, seq: u64, data: T) -> bool {
        if seq <= self.applied_success {
            return false;
        }
        self.applied_success = seq;
        self.data = Some(data);
        if seq >= self.applied_error {
            self.error = None;
        }
        true
    }

    /// Applies a failed fetch, keeping the last good data.
    pub fn apply_failure(&mut self, seq: u64, message: String) -> bool {
        if seq <= self.applied_error || seq <= self.applied_success {
            return false;
        }
        self.applied_error = seq;
        self.error = Some(message);
        true
    }

    /// Sequence number of the newest applied result of either kind.
    pub fn applied(&self) -> u64 {
        self.applied_success.max(self.applied_error)
    }

    /// Whether a fetch newer than every applied result is outstanding.
    pub fn is_loading(&self) -> bool {
        self.issued > self.applied()
    }
}

/// Spawns pollers.
#[derive(Debug, Clone, Copy)]
pub struct PollingTask;

impl PollingTask {
    /// Starts polling `fetch` every `every`, beginning immediately.
    ///
    /// Each fetch runs on its own task so a slow response does not delay the
    /// next tick. Stopping the handle stops scheduling; fetches already in
    /// flight run to completion.
    pub fn spawn<T, F, Fut>(name: &'static str, every: Duration, fetch: F) -> PollHandle<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(PollState::default());
        let tx = Arc::new(tx);
        let cancel = CancellationToken::new();
        let stop = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq = 0u64;

            tracing::debug!(poller = name, interval_ms = every.as_millis() as u64, "Poller started");

            loop {
                tokio::select! {
                    biased;
                    _ = stop.cancelled() => break,
                    _ = ticker.tick() => {
                        seq += 1;
                        tx.send_modify(|s| s.issued = seq);

                        let fut = fetch();
                        let tx = Arc::clone(&tx);
                        tokio::spawn(async move {
                            match fut.await {
                                Ok(data) => {
                                    tx.send_if_modified(|s| s.apply_success(seq, data));
                                }
                                Err(e) => {
                                    tracing::warn!(poller = name, seq, error = %e, "Poll failed");
                                    tx.send_if_modified(|s| s.apply_failure(seq, e.message.clone()));
                                }
                            }
                        });
                    }
                }
            }

            tracing::debug!(poller = name, fetches = seq, "Poller stopped");
        });

        PollHandle {
            state: rx,
            cancel,
            task: Some(task),
        }
    }
}

/// Handle to a running poller. Dropping it stops the poller.
#[derive(Debug)]
pub struct PollHandle<T> {
    state: watch::Receiver<PollState<T>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<T: Clone> PollHandle<T> {
    /// Snapshot of the current state.
    pub fn state(&self) -> PollState<T> {
        self.state.borrow().clone()
    }
}

impl<T> PollHandle<T> {
    /// A receiver notified on every accepted result.
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state.clone()
    }

    /// Stops scheduling further fetches.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether [`PollHandle::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops the poller and waits for its scheduling loop to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
