//! Rectangle record, canvas bounds, and the constraint policy.
//!
//! `Rectangle` is the single persisted entity. It travels over the wire as
//! camelCase JSON and carries the size of the canvas it lives in, which the
//! server owns. `Constraints` holds the tunable rules (minimum size and the
//! optional width-not-exceeding-height rule) that both the client clamp and
//! the server validation read.

#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MIN_SIZE, SEED_LONG_SIDE, SEED_SHORT_SIDE};

/// The editable rectangle as stored on the server and shown on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    /// Left edge in canvas pixels.
    pub x: i64,
    /// Top edge in canvas pixels.
    pub y: i64,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
    /// Width of the containing canvas. Owned by the server.
    pub canvas_width: i64,
    /// Height of the containing canvas. Owned by the server.
    pub canvas_height: i64,
}

impl Rectangle {
    #[must_use]
    pub fn new(x: i64, y: i64, width: i64, height: i64, bounds: Bounds) -> Self {
        Self { x, y, width, height, canvas_width: bounds.width, canvas_height: bounds.height }
    }

    /// Canvas bounds carried by this record.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { width: self.canvas_width, height: self.canvas_height }
    }

    /// Copy of this record placed on a different canvas.
    #[must_use]
    pub fn with_bounds(self, bounds: Bounds) -> Self {
        Self { canvas_width: bounds.width, canvas_height: bounds.height, ..self }
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub fn perimeter(&self) -> i64 {
        self.width.saturating_add(self.height).saturating_mul(2)
    }

    /// Whether the geometry is the same, ignoring the canvas fields.
    #[must_use]
    pub fn same_geometry(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.width == other.width && self.height == other.height
    }
}

/// Size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub width: i64,
    pub height: i64,
}

impl Bounds {
    #[must_use]
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self { width: DEFAULT_CANVAS_WIDTH, height: DEFAULT_CANVAS_HEIGHT }
    }
}

/// Geometry rules shared by the client clamp and the server validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Minimum width and height in pixels.
    pub min_size: i64,
    /// Reject any rectangle wider than it is tall.
    pub width_not_exceeding_height: bool,
}

impl Constraints {
    #[must_use]
    pub fn new(min_size: i64) -> Self {
        Self { min_size, width_not_exceeding_height: false }
    }

    #[must_use]
    pub fn with_width_not_exceeding_height(self, enabled: bool) -> Self {
        Self { width_not_exceeding_height: enabled, ..self }
    }

    /// Whether `rect` satisfies every invariant against its own canvas.
    #[must_use]
    pub fn admits(&self, rect: &Rectangle) -> bool {
        rect.width >= self.min_size
            && rect.height >= self.min_size
            && rect.x >= 0
            && rect.y >= 0
            && rect.right() <= rect.canvas_width
            && rect.bottom() <= rect.canvas_height
            && (!self.width_not_exceeding_height || rect.width <= rect.height)
    }

    /// The record written when the store is empty: 100x50 at the origin,
    /// stood upright when the width may not exceed the height, never
    /// smaller than `min_size` and never larger than the canvas.
    #[must_use]
    pub fn seed(&self, bounds: Bounds) -> Rectangle {
        let long = SEED_LONG_SIDE.max(self.min_size);
        let short = SEED_SHORT_SIDE.max(self.min_size);
        let (width, height) = if self.width_not_exceeding_height { (short, long) } else { (long, short) };
        Rectangle::new(0, 0, width.min(bounds.width), height.min(bounds.height), bounds)
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new(MIN_SIZE)
    }
}
