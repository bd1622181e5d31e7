//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a rectangle may have, in pixels.
pub const MIN_SIZE: i64 = 10;

/// Long side of the seed record.
pub const SEED_LONG_SIDE: i64 = 100;

/// Short side of the seed record.
pub const SEED_SHORT_SIDE: i64 = 50;

/// Default canvas width used when seeding a new record.
pub const DEFAULT_CANVAS_WIDTH: i64 = 600;

/// Default canvas height used when seeding a new record.
pub const DEFAULT_CANVAS_HEIGHT: i64 = 400;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around each resize handle.
pub const HANDLE_RADIUS_PX: i64 = 5;
