//! Boundary and minimum-size enforcement.
//!
//! DESIGN
//! ======
//! Clamping works one axis at a time on a `Span` (start + length). The
//! candidate span is compared with the previous one to decide which edge the
//! user is driving:
//!
//! - both edges moved by the same amount: a drag, so only the position is
//!   pushed back inside the canvas;
//! - only the trailing edge moved (right/bottom handles): the length snaps
//!   into `[min, extent - start]`;
//! - only the leading edge moved (left/top handles): the opposite edge stays
//!   put and the start snaps into `[0, end - min]`;
//! - both edges moved with a new length (typed input, server canonicalization):
//!   a length under the minimum rejects the edit for that axis, anything else
//!   is fitted inside the canvas.
//!
//! When the result still breaks an invariant the axis reverts to the previous
//! span instead of snapping. That keeps the rectangle from jittering against
//! the canvas edge.

#[cfg(test)]
#[path = "clamp_test.rs"]
mod clamp_test;

use crate::rect::{Bounds, Constraints, Rectangle};

/// Validation failures reported to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Width and height must be greater than 0.")]
    NonPositiveSize,
    #[error("X and Y coordinates must be non-negative.")]
    NegativePosition,
    #[error("Width must not exceed height.")]
    WidthExceedsHeight,
}

impl Constraints {
    /// Check a submitted record before it is canonicalized.
    ///
    /// Only rejects what clamping cannot repair: non-positive sizes, negative
    /// positions, and (when enabled) a width larger than the height.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeometryError`] the record violates.
    pub fn validate(&self, rect: &Rectangle) -> Result<(), GeometryError> {
        if rect.width <= 0 || rect.height <= 0 {
            return Err(GeometryError::NonPositiveSize);
        }
        if rect.x < 0 || rect.y < 0 {
            return Err(GeometryError::NegativePosition);
        }
        if self.width_not_exceeding_height && rect.width > rect.height {
            return Err(GeometryError::WidthExceedsHeight);
        }
        Ok(())
    }
}

/// One axis of a rectangle: position plus length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i64,
    pub len: i64,
}

impl Span {
    #[must_use]
    pub fn new(start: i64, len: i64) -> Self {
        Self { start, len }
    }

    #[must_use]
    pub fn end(self) -> i64 {
        self.start.saturating_add(self.len)
    }

    /// Whether the span lies inside `[0, extent]` and is at least `min` long.
    #[must_use]
    pub fn fits(self, extent: i64, min: i64) -> bool {
        self.len >= min && self.start >= 0 && self.end() <= extent
    }
}

/// Clamp `candidate` into `bounds`, using `previous` to decide which edges
/// moved and as the fallback for rejected edits.
///
/// The returned record always carries `bounds` as its canvas size. Feeding
/// the output back in with the same `previous` and `bounds` returns it
/// unchanged.
#[must_use]
pub fn clamp(candidate: Rectangle, previous: Rectangle, bounds: Bounds, constraints: &Constraints) -> Rectangle {
    let clamped = clamp_spans(candidate, previous, bounds, constraints.min_size);
    if constraints.width_not_exceeding_height && clamped.width > clamped.height {
        return clamp_spans(previous, previous, bounds, constraints.min_size);
    }
    clamped
}

fn clamp_spans(candidate: Rectangle, previous: Rectangle, bounds: Bounds, min: i64) -> Rectangle {
    let h = clamp_axis(
        Span::new(candidate.x, candidate.width),
        Span::new(previous.x, previous.width),
        bounds.width,
        min,
    );
    let v = clamp_axis(
        Span::new(candidate.y, candidate.height),
        Span::new(previous.y, previous.height),
        bounds.height,
        min,
    );
    Rectangle::new(h.start, v.start, h.len, v.len, bounds)
}

/// Clamp a single axis. See the module docs for the edge rules.
#[must_use]
pub fn clamp_axis(candidate: Span, previous: Span, extent: i64, min: i64) -> Span {
    let start_moved = candidate.start != previous.start;
    let end_moved = candidate.end() != previous.end();

    let span = match (start_moved, end_moved) {
        (true, true) if candidate.len == previous.len => translate(candidate, extent),
        (true, true) => free_form(candidate, previous, extent, min),
        (true, false) => drag_leading(candidate, min),
        (false, _) => drag_trailing(candidate, extent, min),
    };

    if span.fits(extent, min) {
        span
    } else if previous.fits(extent, min) {
        previous
    } else {
        fit(previous, extent, min)
    }
}

fn translate(span: Span, extent: i64) -> Span {
    let max_start = (extent - span.len).max(0);
    Span::new(span.start.max(0).min(max_start), span.len)
}

fn drag_trailing(span: Span, extent: i64, min: i64) -> Span {
    Span::new(span.start, span.len.max(min).min(extent - span.start))
}

fn drag_leading(span: Span, min: i64) -> Span {
    let end = span.end();
    let start = span.start.max(0).min(end - min);
    Span::new(start, end - start)
}

fn free_form(candidate: Span, previous: Span, extent: i64, min: i64) -> Span {
    if candidate.len < min {
        return previous;
    }
    translate(Span::new(candidate.start, candidate.len.min(extent)), extent)
}

/// Force a span inside the canvas. Only reached when the previous geometry
/// was itself out of bounds.
fn fit(span: Span, extent: i64, min: i64) -> Span {
    let len = span.len.max(min).min(extent.max(min));
    translate(Span::new(span.start, len), extent)
}
