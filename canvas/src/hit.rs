#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HANDLE_RADIUS_PX;
use crate::input::{Handle, Point};
use crate::rect::Rectangle;

/// Which part of the rectangle was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

impl HitPart {
    /// CSS cursor for hovering this part.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Body => "move",
            Self::Handle(handle) => handle.cursor(),
        }
    }
}

/// Test which part of `rect` (if any) is under `point`. Handles are checked
/// before the body so they stay grabbable where they overlap it; on small
/// rectangles where several handles are in reach the nearest one wins.
#[must_use]
pub fn hit_test(point: Point, rect: &Rectangle) -> Option<HitPart> {
    let nearest = Handle::ALL
        .into_iter()
        .map(|h| (h, distance_sq(point, h.position(rect))))
        .filter(|(_, d)| *d <= HANDLE_RADIUS_PX * HANDLE_RADIUS_PX)
        .min_by_key(|(_, d)| *d);
    if let Some((handle, _)) = nearest {
        return Some(HitPart::Handle(handle));
    }

    let inside = point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom();
    inside.then_some(HitPart::Body)
}

fn distance_sq(a: Point, b: Point) -> i64 {
    let (dx, dy) = a.delta_from(b);
    dx * dx + dy * dy
}
