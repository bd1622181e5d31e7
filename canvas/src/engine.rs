use crate::clamp::clamp;
use crate::hit::{HitPart, hit_test};
use crate::input::{Field, Handle, InputState, Point};
use crate::rect::{Constraints, Rectangle};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Cursor shown when the pointer is over nothing grabbable.
pub const DEFAULT_CURSOR: &str = "default";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A drag or resize began. Any in-flight update is now stale.
    SessionStarted,
    /// The displayed geometry changed.
    GeometryChanged(Rectangle),
    /// The geometry is final for now and should be sent to the server.
    Commit(Rectangle),
    SetCursor(&'static str),
}

/// Interaction engine: the displayed rectangle plus the gesture in progress.
///
/// Pure and synchronous. Every handler returns the actions the host must
/// carry out; the engine never talks to the network itself.
#[derive(Debug, Clone)]
pub struct Engine {
    rect: Rectangle,
    constraints: Constraints,
    input: InputState,
}

impl Engine {
    #[must_use]
    pub fn new(rect: Rectangle, constraints: Constraints) -> Self {
        Self { rect, constraints, input: InputState::Idle }
    }

    // --- Data inputs ---

    /// Replace the displayed geometry with an authoritative record.
    pub fn load(&mut self, rect: Rectangle) {
        self.rect = rect;
    }

    // --- Queries ---

    #[must_use]
    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    #[must_use]
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.input.is_active()
    }

    // --- Pointer events ---

    /// Start a session on whatever part of the rectangle is under `point`.
    /// Pressing outside the rectangle does nothing.
    pub fn on_pointer_down(&mut self, point: Point) -> Vec<Action> {
        match hit_test(point, &self.rect) {
            Some(part) => self.begin(part, point),
            None => Vec::new(),
        }
    }

    /// Start dragging the body regardless of hit-testing.
    pub fn grab_body(&mut self, point: Point) -> Vec<Action> {
        self.begin(HitPart::Body, point)
    }

    /// Start resizing from `handle` regardless of hit-testing.
    pub fn grab_handle(&mut self, handle: Handle, point: Point) -> Vec<Action> {
        self.begin(HitPart::Handle(handle), point)
    }

    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        let candidate = match self.input {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { last } => {
                let (dx, dy) = point.delta_from(last);
                self.input = InputState::Dragging { last: point };
                Rectangle { x: self.rect.x + dx, y: self.rect.y + dy, ..self.rect }
            }
            InputState::Resizing { handle, last } => {
                let (dx, dy) = point.delta_from(last);
                self.input = InputState::Resizing { handle, last: point };
                handle.apply(self.rect, dx, dy)
            }
        };
        self.apply_candidate(candidate)
    }

    /// End the session and hand the final geometry off for syncing.
    /// Releasing with no session active is a no-op.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if !self.input.is_active() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::Commit(self.rect), Action::SetCursor(DEFAULT_CURSOR)]
    }

    /// Leaving the canvas ends the session the same way a release does.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    /// Cursor feedback while no session is active.
    pub fn hover(&mut self, point: Point) -> Vec<Action> {
        if self.input.is_active() {
            return Vec::new();
        }
        let cursor = hit_test(point, &self.rect).map_or(DEFAULT_CURSOR, HitPart::cursor);
        vec![Action::SetCursor(cursor)]
    }

    // --- Field edits ---

    /// Apply a typed value to one field. Rejected edits leave the geometry
    /// untouched and produce no actions.
    pub fn set_field(&mut self, field: Field, value: i64) -> Vec<Action> {
        let mut actions = self.apply_candidate(field.set(self.rect, value));
        if !actions.is_empty() {
            actions.push(Action::Commit(self.rect));
        }
        actions
    }

    fn begin(&mut self, part: HitPart, point: Point) -> Vec<Action> {
        self.input = match part {
            HitPart::Body => InputState::Dragging { last: point },
            HitPart::Handle(handle) => InputState::Resizing { handle, last: point },
        };
        vec![Action::SessionStarted, Action::SetCursor(part.cursor())]
    }

    fn apply_candidate(&mut self, candidate: Rectangle) -> Vec<Action> {
        let next = clamp(candidate, self.rect, self.rect.bounds(), &self.constraints);
        if next == self.rect {
            return Vec::new();
        }
        self.rect = next;
        vec![Action::GeometryChanged(next)]
    }
}
