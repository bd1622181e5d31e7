use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use canvas::rect::Bounds;

use super::*;
use crate::api::test_helpers::{MockStore, rect};
use crate::cancel::CancellationToken;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn pt(x: i64, y: i64) -> Point {
    Point::new(x, y)
}

async fn session_for(store: &Arc<MockStore>) -> Session {
    Session::load(store.clone(), Constraints::default(), SyncConfig::default())
        .await
        .unwrap()
}

struct OfflineStore;

#[async_trait]
impl RectangleStore for OfflineStore {
    async fn fetch(&self) -> Result<Rectangle, ClientError> {
        Err(ClientError::Network("connection refused".into()))
    }

    async fn update(&self, _rect: &Rectangle, _cancel: CancellationToken) -> Result<Rectangle, ClientError> {
        Err(ClientError::Network("connection refused".into()))
    }
}

// =============================================================
// Loading
// =============================================================

#[tokio::test(start_paused = true)]
async fn load_uses_fetched_record() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;
    let view = session.view();
    assert_eq!(view.rect, rect(0, 0, 100, 50));
    assert_eq!(view.perimeter, 300);
    assert!(!view.interacting);
    assert_eq!(view.status_line(), None);
}

#[tokio::test]
async fn load_failure_is_reported() {
    let result = Session::load(Arc::new(OfflineStore), Constraints::default(), SyncConfig::default()).await;
    let Err(err) = result else {
        panic!("load should fail");
    };
    assert_eq!(err.to_string(), "Failed to load rectangle data: Network error: connection refused");
}

// =============================================================
// Scenarios
// =============================================================

#[tokio::test(start_paused = true)]
async fn drag_release_update_complete_then_clears() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;

    session.grab_body(pt(10, 10));
    session.pointer_move(pt(60, 30));
    assert_eq!(session.view().rect, rect(50, 20, 100, 50));
    assert!(session.view().interacting);

    session.pointer_up();
    let view = session.settle().await;
    assert_eq!(view.rect, rect(50, 20, 100, 50));
    assert!(view.complete);
    assert_eq!(view.status_line(), Some(COMPLETE_MESSAGE));
    assert_eq!(store.received(), vec![rect(50, 20, 100, 50)]);

    tokio::time::sleep(ms(2001)).await;
    let view = session.view();
    assert!(!view.complete);
    assert_eq!(view.status_line(), None);
}

#[tokio::test(start_paused = true)]
async fn right_handle_overshrink_stops_at_min_size() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;

    session.grab_handle(Handle::Right, pt(100, 25));
    session.pointer_move(pt(-100, 25));
    assert_eq!(session.view().rect.width, 10);
}

#[tokio::test(start_paused = true)]
async fn rejected_update_shows_error_and_keeps_geometry() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    store.fail_next(ClientError::Validation("Width and height must be greater than 0.".into()));
    let mut session = session_for(&store).await;

    session.set_field(Field::X, 40);
    let view = session.settle().await;
    assert_eq!(view.error.as_deref(), Some("Width and height must be greater than 0."));
    assert_eq!(view.rect, rect(40, 0, 100, 50));
    assert!(!view.updating);
    assert_eq!(store.current(), rect(0, 0, 100, 50));
}

#[tokio::test(start_paused = true)]
async fn updating_line_shows_while_request_in_flight() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)).with_latency(ms(1000)));
    let mut session = session_for(&store).await;

    session.set_field(Field::Y, 30);
    tokio::time::sleep(ms(600)).await;
    assert_eq!(session.view().status_line(), Some(UPDATING_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn new_session_discards_in_flight_result() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)).with_latency(ms(1000)));
    let mut session = session_for(&store).await;

    session.grab_body(pt(10, 10));
    session.pointer_move(pt(110, 10));
    session.pointer_up();
    tokio::time::sleep(ms(600)).await;
    assert!(session.view().updating);

    session.grab_body(pt(110, 10));
    assert!(!session.view().updating);
    session.pointer_move(pt(210, 10));
    tokio::time::sleep(ms(2000)).await;
    assert_eq!(session.view().rect, rect(200, 0, 100, 50));

    session.pointer_up();
    let view = session.settle().await;
    assert_eq!(store.received(), vec![rect(100, 0, 100, 50), rect(200, 0, 100, 50)]);
    assert_eq!(view.rect, rect(200, 0, 100, 50));
    assert_eq!(session.sync_status().applied_seq, 1);
}

#[tokio::test(start_paused = true)]
async fn canonical_record_replaces_local_geometry() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;
    *store.record.lock().unwrap() = rect(0, 0, 100, 50).with_bounds(Bounds::new(300, 200));

    session.grab_body(pt(10, 10));
    session.pointer_move(pt(260, 10));
    session.pointer_up();
    let view = session.settle().await;
    assert_eq!(view.rect, Rectangle::new(200, 0, 100, 50, Bounds::new(300, 200)));
}

#[tokio::test(start_paused = true)]
async fn applied_record_does_not_override_newer_gesture() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;
    *store.record.lock().unwrap() = rect(0, 0, 100, 50).with_bounds(Bounds::new(300, 200));

    session.set_field(Field::X, 250);
    tokio::time::sleep(ms(600)).await;
    assert_eq!(session.sync_status().applied_seq, 1);

    session.grab_body(pt(260, 10));
    session.pointer_move(pt(270, 10));
    session.pointer_up();
    assert_eq!(session.view().rect.x, 260);
}

#[tokio::test(start_paused = true)]
async fn new_session_clears_error_line() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    store.fail_next(ClientError::Server { status: 500 });
    let mut session = session_for(&store).await;

    session.set_field(Field::X, 40);
    assert!(session.settle().await.error.is_some());

    session.grab_body(pt(50, 10));
    assert_eq!(session.view().error, None);
}

#[tokio::test(start_paused = true)]
async fn release_without_session_schedules_nothing() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;

    assert!(session.pointer_up().is_empty());
    assert!(session.pointer_leave().is_empty());
    tokio::time::sleep(ms(1000)).await;
    assert!(store.received().is_empty());
}

#[tokio::test(start_paused = true)]
async fn pointer_down_hit_tests_handles() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;

    let actions = session.pointer_down(pt(100, 50));
    assert_eq!(actions[0], Action::SessionStarted);
    session.pointer_move(pt(120, 70));
    assert_eq!(session.view().rect, rect(0, 0, 120, 70));
}

#[tokio::test(start_paused = true)]
async fn hover_reports_cursor() {
    let store = Arc::new(MockStore::new(rect(0, 0, 100, 50)));
    let mut session = session_for(&store).await;
    assert_eq!(session.hover(pt(50, 25)), vec![Action::SetCursor("move")]);
}
