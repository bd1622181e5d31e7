use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::*;
use crate::state::test_helpers::{rect, seeded_app_state, test_app_state};

#[tokio::test]
async fn get_returns_seeded_record() {
    let state = seeded_app_state(rect(0, 0, 100, 50)).await;
    let Json(record) = get_rectangle(State(state)).await.unwrap();
    assert_eq!(record, rect(0, 0, 100, 50));
}

#[tokio::test]
async fn get_without_record_is_404() {
    let resp = get_rectangle(State(test_app_state())).await.into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_returns_canonical_record() {
    let state = seeded_app_state(rect(0, 0, 100, 50)).await;
    let Json(record) = put_rectangle(State(state.clone()), Ok(Json(rect(550, 0, 100, 50))))
        .await
        .unwrap();
    assert_eq!(record, rect(500, 0, 100, 50));

    let Json(stored) = get_rectangle(State(state)).await.unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn put_invalid_geometry_is_400() {
    let state = seeded_app_state(rect(0, 0, 100, 50)).await;
    let resp = put_rectangle(State(state), Ok(Json(rect(0, 0, 100, 0))))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
