//! Client side of the rectangle editor.
//!
//! Joins the pure interaction engine from the `canvas` crate with the
//! network: a [`api::RectangleStore`] talks to the server, a
//! [`sync::DebouncedSync`] coalesces edits into one delayed update and
//! cancels superseded ones, and a [`session::Session`] routes engine actions
//! between the two and projects everything into a [`session::RectangleView`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | `RectangleStore` trait and the reqwest-backed HTTP store |
//! | [`cancel`] | Cooperative cancellation source/token pair |
//! | [`sync`] | Debounced, cancelable update pipeline |
//! | [`session`] | Controller and view projection |

pub mod api;
pub mod cancel;
pub mod session;
pub mod sync;

pub use api::{ClientError, HttpRectangleStore, RectangleStore};
pub use cancel::{CancellationSource, CancellationToken};
pub use session::{RectangleView, Session, SessionError};
pub use sync::{DebouncedSync, SyncConfig, SyncStatus};
