//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the rectangle repository plus the validation and timing settings
//! resolved from config. Updates are read-modify-write against the store,
//! so they are serialized through `write_lock`.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;
use std::time::Duration;

use canvas::rect::{Bounds, Constraints};
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::services::rectangle::RectangleRepo;
use crate::store::KvStore;

/// Clone is required by Axum; all shared fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub repo: RectangleRepo,
    pub constraints: Constraints,
    /// Canvas bounds for seeding and for updates that arrive before any
    /// record exists.
    pub bounds: Bounds,
    pub update_delay: Duration,
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, config: &ServerConfig) -> Self {
        Self {
            repo: RectangleRepo::new(store),
            constraints: config.constraints(),
            bounds: config.canvas,
            update_delay: config.update_delay,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
