//! Session controller: one rectangle, one engine, one sync pipeline.
//!
//! The host feeds pointer and field events in; the session forwards them to
//! the [`Engine`], routes the resulting actions (a new gesture cancels the
//! outstanding update, a commit schedules a new one), and folds the
//! server's canonical record back into the engine once the gesture is over.
//! Rendering reads [`Session::view`], a plain value with no behavior.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use canvas::engine::{Action, Engine};
use canvas::input::{Field, Handle, Point};
use canvas::rect::{Constraints, Rectangle};
use tokio::sync::watch;
use tracing::info;

use crate::api::{ClientError, RectangleStore};
use crate::sync::{DebouncedSync, SyncConfig, SyncStatus};

/// Status line shown while a request is on the wire.
pub const UPDATING_MESSAGE: &str = "Updating rectangle dimensions...";

/// Status line shown briefly after a successful update.
pub const COMPLETE_MESSAGE: &str = "Update complete.";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to load rectangle data: {0}")]
    Load(#[source] ClientError),
}

/// Everything a renderer needs, projected from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectangleView {
    pub rect: Rectangle,
    pub perimeter: i64,
    pub interacting: bool,
    pub updating: bool,
    pub complete: bool,
    pub error: Option<String>,
}

impl RectangleView {
    /// The transient status line, if any. Updating wins over complete.
    #[must_use]
    pub fn status_line(&self) -> Option<&'static str> {
        if self.updating {
            Some(UPDATING_MESSAGE)
        } else if self.complete {
            Some(COMPLETE_MESSAGE)
        } else {
            None
        }
    }
}

pub struct Session {
    engine: Engine,
    sync: DebouncedSync,
    status: watch::Receiver<SyncStatus>,
    /// Last `applied_seq` folded into the engine or deliberately skipped.
    seen_seq: u64,
}

impl Session {
    /// Fetch the current record and start a session around it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Load`] if the initial fetch fails.
    pub async fn load(
        store: Arc<dyn RectangleStore>,
        constraints: Constraints,
        config: SyncConfig,
    ) -> Result<Self, SessionError> {
        let rect = store.fetch().await.map_err(SessionError::Load)?;
        info!(x = rect.x, y = rect.y, width = rect.width, height = rect.height, "rectangle loaded");
        Ok(Self::new(rect, store, constraints, config))
    }

    #[must_use]
    pub fn new(rect: Rectangle, store: Arc<dyn RectangleStore>, constraints: Constraints, config: SyncConfig) -> Self {
        let sync = DebouncedSync::new(store, config);
        let status = sync.subscribe();
        Self { engine: Engine::new(rect, constraints), sync, status, seen_seq: 0 }
    }

    // --- Pointer events ---

    pub fn pointer_down(&mut self, point: Point) -> Vec<Action> {
        let actions = self.engine.on_pointer_down(point);
        self.dispatch(actions)
    }

    pub fn grab_body(&mut self, point: Point) -> Vec<Action> {
        let actions = self.engine.grab_body(point);
        self.dispatch(actions)
    }

    pub fn grab_handle(&mut self, handle: Handle, point: Point) -> Vec<Action> {
        let actions = self.engine.grab_handle(handle, point);
        self.dispatch(actions)
    }

    pub fn pointer_move(&mut self, point: Point) -> Vec<Action> {
        let actions = self.engine.on_pointer_move(point);
        self.dispatch(actions)
    }

    pub fn pointer_up(&mut self) -> Vec<Action> {
        let actions = self.engine.on_pointer_up();
        self.dispatch(actions)
    }

    pub fn pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.engine.on_pointer_leave();
        self.dispatch(actions)
    }

    pub fn hover(&mut self, point: Point) -> Vec<Action> {
        self.engine.hover(point)
    }

    // --- Field edits ---

    pub fn set_field(&mut self, field: Field, value: i64) -> Vec<Action> {
        let actions = self.engine.set_field(field, value);
        self.dispatch(actions)
    }

    // --- Queries ---

    /// Project the current state, first folding in any record the server
    /// accepted since the last call (only while no gesture is active).
    pub fn view(&mut self) -> RectangleView {
        self.reconcile();
        let status = self.status.borrow();
        let rect = self.engine.rect();
        RectangleView {
            rect,
            perimeter: rect.perimeter(),
            interacting: self.engine.is_interacting(),
            updating: status.updating,
            complete: status.complete,
            error: status.error.clone(),
        }
    }

    #[must_use]
    pub fn sync_status(&self) -> SyncStatus {
        self.sync.status()
    }

    /// Wait for the pending update (if any) to land or fail, then reconcile.
    pub async fn settle(&mut self) -> RectangleView {
        self.sync.settle().await;
        self.view()
    }

    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        for action in &actions {
            match action {
                Action::SessionStarted => {
                    self.sync.cancel();
                    self.sync.clear_error();
                    self.skip_applied();
                }
                Action::Commit(rect) => {
                    self.skip_applied();
                    self.sync.schedule(*rect);
                }
                Action::GeometryChanged(_) | Action::SetCursor(_) => {}
            }
        }
        actions
    }

    /// Local edits supersede anything the server accepted before them.
    fn skip_applied(&mut self) {
        self.seen_seq = self.status.borrow().applied_seq;
    }

    fn reconcile(&mut self) {
        if self.engine.is_interacting() {
            return;
        }
        let (seq, applied) = {
            let status = self.status.borrow();
            (status.applied_seq, status.applied)
        };
        if seq == self.seen_seq {
            return;
        }
        self.seen_seq = seq;
        if let Some(record) = applied {
            self.engine.load(record);
        }
    }
}
