//! Rectangle routes.

#[cfg(test)]
#[path = "rectangle_test.rs"]
mod rectangle_test;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use canvas::rect::Rectangle;
use tracing::warn;

use crate::services::rectangle::{self, MISSING_BODY_MESSAGE, RectangleError};
use crate::state::AppState;

/// `GET /api/rectangle` — return the stored record.
pub async fn get_rectangle(State(state): State<AppState>) -> Result<Json<Rectangle>, RectangleError> {
    rectangle::get_rectangle(&state).await.map(Json)
}

/// `PUT /api/rectangle` — validate, canonicalize and store a new record.
///
/// A missing or malformed body is a validation failure, not an extractor
/// rejection, so the client always gets the same plain-text 400 shape.
pub async fn put_rectangle(
    State(state): State<AppState>,
    body: Result<Json<Rectangle>, JsonRejection>,
) -> Result<Json<Rectangle>, RectangleError> {
    let Json(candidate) = body.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "unreadable rectangle body");
        RectangleError::Validation(MISSING_BODY_MESSAGE.to_owned())
    })?;
    rectangle::update_rectangle(&state, candidate).await.map(Json)
}
