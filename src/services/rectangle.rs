//! Rectangle service: load, validate, canonicalize, persist.
//!
//! DESIGN
//! ======
//! The server holds a single record under a fixed key. An update is
//! checked against the configured constraints first; anything that passes
//! is then clamped against the stored record using the stored canvas
//! bounds (the client's `canvasWidth`/`canvasHeight` are ignored), so the
//! persisted geometry always lies inside the canvas. The clamped record is
//! what the client gets back.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures are 400s carrying a human-readable reason. A missing
//! record is a 404. Store failures are 500s and are logged here, once, with
//! the underlying cause.

#[cfg(test)]
#[path = "rectangle_test.rs"]
mod rectangle_test;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use canvas::clamp::{GeometryError, clamp};
use canvas::rect::{Bounds, Constraints, Rectangle};
use tracing::{debug, error, info, warn};

use crate::state::AppState;
use crate::store::{KvStore, StoreError};

/// Storage key of the one rectangle record.
pub const RECTANGLE_KEY: &str = "rectangle";

/// Reason returned when a `PUT` carries no usable body.
pub const MISSING_BODY_MESSAGE: &str = "Rectangle data is required.";

#[derive(Debug, thiserror::Error)]
pub enum RectangleError {
    #[error("{0}")]
    Validation(String),
    #[error("Rectangle data not found.")]
    NotFound,
    #[error("Internal server error: {0}")]
    Store(#[from] StoreError),
}

impl From<GeometryError> for RectangleError {
    fn from(err: GeometryError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl RectangleError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RectangleError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

// =============================================================================
// REPOSITORY
// =============================================================================

/// Typed access to the rectangle record in a [`KvStore`].
#[derive(Clone)]
pub struct RectangleRepo {
    store: Arc<dyn KvStore>,
}

impl RectangleRepo {
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store fails or the record does not
    /// decode as a rectangle.
    pub async fn load(&self) -> Result<Option<Rectangle>, StoreError> {
        match self.store.get(RECTANGLE_KEY).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    pub async fn save(&self, rect: &Rectangle) -> Result<(), StoreError> {
        let value = serde_json::to_value(rect)?;
        self.store.put(RECTANGLE_KEY, &value).await
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Write the seed record if none exists. Returns whether it was written.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be read or written.
pub async fn seed_if_missing(
    repo: &RectangleRepo,
    bounds: Bounds,
    constraints: &Constraints,
) -> Result<bool, StoreError> {
    if repo.load().await?.is_some() {
        return Ok(false);
    }
    let seed = constraints.seed(bounds);
    repo.save(&seed).await?;
    info!(
        width = seed.width,
        height = seed.height,
        canvas_width = bounds.width,
        canvas_height = bounds.height,
        "seeded rectangle record"
    );
    Ok(true)
}

/// Read the stored record.
///
/// # Errors
///
/// [`RectangleError::NotFound`] if nothing is stored, [`RectangleError::Store`]
/// if the store fails.
pub async fn get_rectangle(state: &AppState) -> Result<Rectangle, RectangleError> {
    let loaded = state.repo.load().await.inspect_err(|e| {
        error!(error = %e, "failed to read rectangle");
    })?;
    loaded.ok_or(RectangleError::NotFound)
}

/// Validate `candidate`, clamp it against the stored record, persist and
/// return the canonical result.
///
/// # Errors
///
/// [`RectangleError::Validation`] if the geometry breaks a constraint,
/// [`RectangleError::Store`] if the store fails.
pub async fn update_rectangle(state: &AppState, candidate: Rectangle) -> Result<Rectangle, RectangleError> {
    if !state.update_delay.is_zero() {
        debug!(delay_ms = state.update_delay.as_millis(), "delaying rectangle update");
        tokio::time::sleep(state.update_delay).await;
    }

    state.constraints.validate(&candidate).inspect_err(|e| {
        warn!(
            x = candidate.x,
            y = candidate.y,
            width = candidate.width,
            height = candidate.height,
            reason = %e,
            "rejected rectangle update"
        );
    })?;

    let _guard = state.write_lock.lock().await;
    let stored = state.repo.load().await.inspect_err(|e| {
        error!(error = %e, "failed to read rectangle");
    })?;
    let canonical = canonicalize(candidate, stored, state);
    state.repo.save(&canonical).await.inspect_err(|e| {
        error!(error = %e, "failed to write rectangle");
    })?;

    info!(
        x = canonical.x,
        y = canonical.y,
        width = canonical.width,
        height = canonical.height,
        "rectangle updated"
    );
    Ok(canonical)
}

/// Clamp `candidate` into the stored canvas. With no stored record the
/// configured bounds apply and the candidate is its own reference.
pub(crate) fn canonicalize(candidate: Rectangle, stored: Option<Rectangle>, state: &AppState) -> Rectangle {
    let bounds = stored.map_or(state.bounds, |s| s.bounds());
    let candidate = candidate.with_bounds(bounds);
    let previous = stored.unwrap_or(candidate);
    clamp(candidate, previous, bounds, &state.constraints)
}
