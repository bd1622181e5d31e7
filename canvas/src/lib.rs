//! Geometry and interaction core for the rectangle editor.
//!
//! This crate owns everything about the editable rectangle that does not
//! touch the network: the record type shared with the server, the clamp
//! policy that keeps a rectangle inside its canvas, hit-testing of the body
//! and its eight handles, and the drag/resize state machine that turns
//! pointer events into geometry. The host (the `client` crate, or a UI layer
//! on top of it) wires pointer events in and forwards the resulting
//! [`engine::Action`]s to the sync pipeline.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`rect`] | `Rectangle` record, canvas bounds, and constraint policy |
//! | [`clamp`] | Boundary and minimum-size enforcement |
//! | [`input`] | Pointer points, resize handles, and the gesture state |
//! | [`hit`] | Hit-testing the body and handles |
//! | [`engine`] | Interaction engine producing [`engine::Action`]s |
//! | [`consts`] | Shared numeric constants |

pub mod clamp;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod rect;
