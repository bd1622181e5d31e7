//! Debounced, cancelable rectangle updates.
//!
//! DESIGN
//! ======
//! Each `schedule` call stamps a new generation, cancels whatever the previous
//! generation was doing (waiting out the quiescence window or waiting on the
//! server), and spawns one task for the new geometry. That task sleeps for the
//! debounce window, sends the update, and applies the response only if its
//! generation is still current. At most one update is logically in flight, so
//! an older response can never overwrite a newer edit.
//!
//! All observable state lives in a `watch` channel. Every transition goes
//! through `send_if_modified` with a generation check inside the closure, so
//! the check and the write happen under the same lock.
//!
//! LIFECYCLE
//! =========
//! The pending cancellation source is created on `schedule`, replaced on the
//! next `schedule`, fired by `cancel` (a new interaction session), and fired
//! on drop.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::sync::Arc;
use std::time::Duration;

use canvas::rect::Rectangle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::RectangleStore;
use crate::cancel::{CancellationSource, CancellationToken};

/// Quiescence window before an update is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// How long the "update complete" flag stays up.
pub const DEFAULT_COMPLETE_DISPLAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    pub debounce: Duration,
    pub complete_display: Duration,
}

impl SyncConfig {
    /// Send on the next tick after a commit, with no quiescence window.
    #[must_use]
    pub fn immediate() -> Self {
        Self { debounce: Duration::ZERO, ..Self::default() }
    }

    #[must_use]
    pub fn with_debounce(self, debounce: Duration) -> Self {
        Self { debounce, ..self }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { debounce: DEFAULT_DEBOUNCE, complete_display: DEFAULT_COMPLETE_DISPLAY }
    }
}

/// Snapshot of the sync pipeline, published on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    /// A request is on the wire.
    pub updating: bool,
    /// The last update succeeded recently.
    pub complete: bool,
    /// Message from the last genuine failure. Cleared by the next success.
    pub error: Option<String>,
    /// Latest canonical record accepted from the server.
    pub applied: Option<Rectangle>,
    /// Bumped every time `applied` is replaced.
    pub applied_seq: u64,
    /// Updates actually sent (after the debounce window).
    pub requests_sent: u64,
    /// A timer is armed or a request is in flight.
    pub pending: bool,
    /// Stamp of the most recent `schedule` or `cancel`.
    pub generation: u64,
}

/// Coalesces geometry commits into a single delayed remote update.
///
/// `schedule` spawns onto the ambient tokio runtime and must be called from
/// within one.
pub struct DebouncedSync {
    store: Arc<dyn RectangleStore>,
    config: SyncConfig,
    status: Arc<watch::Sender<SyncStatus>>,
    pending: Option<CancellationSource>,
}

impl DebouncedSync {
    #[must_use]
    pub fn new(store: Arc<dyn RectangleStore>, config: SyncConfig) -> Self {
        let (tx, _rx) = watch::channel(SyncStatus::default());
        Self { store, config, status: Arc::new(tx), pending: None }
    }

    #[must_use]
    pub fn config(&self) -> SyncConfig {
        self.config
    }

    #[must_use]
    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// Queue `rect` for sending once the debounce window passes without
    /// another call. Supersedes any earlier pending or in-flight update.
    pub fn schedule(&mut self, rect: Rectangle) {
        let generation = self.supersede(true);
        let source = CancellationSource::new();
        let token = source.token();
        self.pending = Some(source);

        debug!(generation, debounce_ms = self.config.debounce.as_millis(), "rectangle update scheduled");
        tokio::spawn(run_update(
            Arc::clone(&self.store),
            Arc::clone(&self.status),
            self.config,
            generation,
            rect,
            token,
        ));
    }

    /// Drop any pending or in-flight update without scheduling a new one.
    pub fn cancel(&mut self) {
        if self.pending.is_some() {
            debug!("pending rectangle update cancelled");
        }
        self.supersede(false);
    }

    /// Clear the persistent error line.
    pub fn clear_error(&self) {
        self.status.send_if_modified(|s| s.error.take().is_some());
    }

    /// Wait until no timer is armed and no request is in flight.
    pub async fn settle(&self) {
        let mut rx = self.subscribe();
        let closed = rx.wait_for(|s| !s.pending).await.is_err();
        if closed {
            warn!("sync status channel closed while settling");
        }
    }

    fn supersede(&mut self, pending: bool) -> u64 {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        let mut generation = 0;
        self.status.send_modify(|s| {
            s.generation += 1;
            s.updating = false;
            s.complete = false;
            s.pending = pending;
            generation = s.generation;
        });
        generation
    }
}

impl Drop for DebouncedSync {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

async fn run_update(
    store: Arc<dyn RectangleStore>,
    status: Arc<watch::Sender<SyncStatus>>,
    config: SyncConfig,
    generation: u64,
    rect: Rectangle,
    token: CancellationToken,
) {
    tokio::select! {
        biased;
        () = token.cancelled() => return,
        () = tokio::time::sleep(config.debounce) => {}
    }

    let started = status.send_if_modified(|s| {
        if s.generation != generation {
            return false;
        }
        s.updating = true;
        s.requests_sent += 1;
        true
    });
    if !started {
        return;
    }

    debug!(generation, x = rect.x, y = rect.y, width = rect.width, height = rect.height, "sending rectangle update");
    match store.update(&rect, token).await {
        Ok(record) => {
            let applied = status.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                s.updating = false;
                s.pending = false;
                s.complete = true;
                s.error = None;
                s.applied = Some(record);
                s.applied_seq += 1;
                true
            });
            if !applied {
                debug!(generation, "discarding superseded rectangle response");
                return;
            }
            info!(
                generation,
                x = record.x,
                y = record.y,
                width = record.width,
                height = record.height,
                "rectangle update applied"
            );

            tokio::time::sleep(config.complete_display).await;
            status.send_if_modified(|s| {
                if s.generation != generation || !s.complete {
                    return false;
                }
                s.complete = false;
                true
            });
        }
        Err(err) if err.is_cancelled() => {
            debug!(generation, "rectangle update superseded");
        }
        Err(err) => {
            warn!(generation, error = %err, "rectangle update failed");
            status.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                s.updating = false;
                s.pending = false;
                s.error = Some(err.to_string());
                true
            });
        }
    }
}
