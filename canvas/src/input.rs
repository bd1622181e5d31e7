//! Input model: pointer points, resize handles, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. Both active variants keep the pointer position of the previous
//! event so each move applies an incremental delta; the anchor advances with
//! the pointer, which keeps long drags free of accumulated drift.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::rect::Rectangle;

/// A pointer position in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Build a point from fractional client coordinates, rounding to the
    /// nearest pixel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_client(x: f64, y: f64) -> Self {
        Self { x: x.round() as i64, y: y.round() as i64 }
    }

    /// Offset from `origin` to `self`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> (i64, i64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// One of the eight resize handles on the rectangle border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    /// Every handle, edge midpoints first.
    pub const ALL: [Handle; 8] = [
        Handle::Top,
        Handle::Right,
        Handle::Bottom,
        Handle::Left,
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Apply a pointer delta to `rect` according to this handle's edit rule.
    ///
    /// The result is unclamped; it may have a negative size.
    #[must_use]
    pub fn apply(self, rect: Rectangle, dx: i64, dy: i64) -> Rectangle {
        let mut r = rect;
        match self {
            Self::Top => {
                r.y += dy;
                r.height -= dy;
            }
            Self::Bottom => r.height += dy,
            Self::Left => {
                r.x += dx;
                r.width -= dx;
            }
            Self::Right => r.width += dx,
            Self::TopLeft => {
                r.x += dx;
                r.y += dy;
                r.width -= dx;
                r.height -= dy;
            }
            Self::TopRight => {
                r.y += dy;
                r.width += dx;
                r.height -= dy;
            }
            Self::BottomLeft => {
                r.x += dx;
                r.width -= dx;
                r.height += dy;
            }
            Self::BottomRight => {
                r.width += dx;
                r.height += dy;
            }
        }
        r
    }

    /// Where this handle sits on `rect`.
    #[must_use]
    pub fn position(self, rect: &Rectangle) -> Point {
        let cx = rect.x + rect.width / 2;
        let cy = rect.y + rect.height / 2;
        match self {
            Self::Top => Point::new(cx, rect.y),
            Self::Right => Point::new(rect.right(), cy),
            Self::Bottom => Point::new(cx, rect.bottom()),
            Self::Left => Point::new(rect.x, cy),
            Self::TopLeft => Point::new(rect.x, rect.y),
            Self::TopRight => Point::new(rect.right(), rect.y),
            Self::BottomLeft => Point::new(rect.x, rect.bottom()),
            Self::BottomRight => Point::new(rect.right(), rect.bottom()),
        }
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Top | Self::Bottom => "ns-resize",
            Self::Left | Self::Right => "ew-resize",
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
        }
    }

    /// Parse the camelCase handle names used on the command line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "right" => Some(Self::Right),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "topLeft" => Some(Self::TopLeft),
            "topRight" => Some(Self::TopRight),
            "bottomLeft" => Some(Self::BottomLeft),
            "bottomRight" => Some(Self::BottomRight),
            _ => None,
        }
    }
}

/// Editable fields exposed through the numeric inputs beside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
    Width,
    Height,
}

impl Field {
    /// Copy of `rect` with this field replaced.
    #[must_use]
    pub fn set(self, rect: Rectangle, value: i64) -> Rectangle {
        match self {
            Self::X => Rectangle { x: value, ..rect },
            Self::Y => Rectangle { y: value, ..rect },
            Self::Width => Rectangle { width: value, ..rect },
            Self::Height => Rectangle { height: value, ..rect },
        }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next grab.
    #[default]
    Idle,
    /// The user is moving the whole rectangle.
    Dragging {
        /// Pointer position at the previous event.
        last: Point,
    },
    /// The user is resizing the rectangle from one handle.
    Resizing {
        /// Which handle is being dragged.
        handle: Handle,
        /// Pointer position at the previous event.
        last: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The handle being dragged, if resizing.
    #[must_use]
    pub fn handle(&self) -> Option<Handle> {
        match self {
            Self::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }
}
