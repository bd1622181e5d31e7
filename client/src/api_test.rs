use super::*;
use crate::cancel::CancellationSource;

#[test]
fn endpoint_appends_rectangle_path() {
    assert_eq!(rectangle_endpoint("http://127.0.0.1:3000"), "http://127.0.0.1:3000/api/rectangle");
}

#[test]
fn endpoint_tolerates_trailing_slash() {
    assert_eq!(rectangle_endpoint("http://localhost:3000/"), "http://localhost:3000/api/rectangle");
}

#[test]
fn http_store_exposes_endpoint() {
    let store = HttpRectangleStore::new("http://example.test");
    assert_eq!(store.endpoint(), "http://example.test/api/rectangle");
}

#[test]
fn bad_request_surfaces_body_verbatim() {
    let err = error_for_status(400, "Width and height must be greater than 0.".into());
    assert_eq!(err, ClientError::Validation("Width and height must be greater than 0.".into()));
    assert_eq!(err.to_string(), "Width and height must be greater than 0.");
}

#[test]
fn bad_request_without_body_gets_fallback_message() {
    assert_eq!(error_for_status(400, "  ".into()).to_string(), "Invalid rectangle.");
}

#[test]
fn not_found_maps_to_not_found() {
    assert_eq!(error_for_status(404, "Rectangle data not found.".into()), ClientError::NotFound);
}

#[test]
fn server_error_is_generic() {
    let err = error_for_status(500, "Internal server error: disk on fire".into());
    assert_eq!(err, ClientError::Server { status: 500 });
    assert!(!err.to_string().contains("disk"));
}

#[test]
fn only_cancelled_reports_cancelled() {
    assert!(ClientError::Cancelled.is_cancelled());
    assert!(!ClientError::NotFound.is_cancelled());
    assert!(!ClientError::Network("reset".into()).is_cancelled());
}

#[tokio::test]
async fn update_with_cancelled_token_never_sends() {
    // Unroutable address: if the request were attempted it would fail with a
    // network error rather than `Cancelled`.
    let store = HttpRectangleStore::new("http://127.0.0.1:9");
    let source = CancellationSource::new();
    source.cancel();
    let result = store.update(&test_helpers::rect(0, 0, 100, 50), source.token()).await;
    assert_eq!(result, Err(ClientError::Cancelled));
}

#[tokio::test]
async fn fetch_against_closed_port_is_network_error() {
    let store = HttpRectangleStore::new("http://127.0.0.1:9");
    let result = store.fetch().await;
    assert!(matches!(result, Err(ClientError::Network(_))));
}
