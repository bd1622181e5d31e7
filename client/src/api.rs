//! Remote store for the rectangle record.
//!
//! `RectangleStore` is the seam the sync pipeline talks to. The HTTP
//! implementation issues `GET`/`PUT` against `{base}/api/rectangle` with
//! camelCase JSON bodies and maps non-success statuses onto [`ClientError`].
//!
//! ERROR HANDLING
//! ==============
//! A 400 carries a human-readable reason from the server, which is surfaced
//! verbatim. Any other failure status is reported generically; the client
//! never retries on its own. Cancellation is its own variant so callers can
//! swallow it without string matching.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use canvas::rect::Rectangle;

use crate::cancel::CancellationToken;

/// Path of the single rectangle resource.
pub const RECTANGLE_PATH: &str = "/api/rectangle";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the geometry. The message is shown as-is.
    #[error("{0}")]
    Validation(String),
    #[error("Rectangle data not found.")]
    NotFound,
    #[error("Server error ({status}). Please try again later.")]
    Server { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response from server: {0}")]
    Decode(String),
    /// Superseded by a newer update. Never shown to the user.
    #[error("update cancelled")]
    Cancelled,
}

impl ClientError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Fetch and update the single rectangle record.
#[async_trait]
pub trait RectangleStore: Send + Sync {
    /// Read the current canonical record.
    async fn fetch(&self) -> Result<Rectangle, ClientError>;

    /// Submit `rect` and return the server's canonical version of it.
    ///
    /// Implementations must observe `cancel` and return
    /// [`ClientError::Cancelled`] once it fires, without applying the response.
    async fn update(&self, rect: &Rectangle, cancel: CancellationToken) -> Result<Rectangle, ClientError>;
}

/// `RectangleStore` backed by the server's REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpRectangleStore {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRectangleStore {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, endpoint: rectangle_endpoint(base_url) }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn put(&self, rect: &Rectangle) -> Result<Rectangle, ClientError> {
        let resp = self
            .http
            .put(&self.endpoint)
            .json(rect)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        read_record(resp).await
    }
}

#[async_trait]
impl RectangleStore for HttpRectangleStore {
    async fn fetch(&self) -> Result<Rectangle, ClientError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        read_record(resp).await
    }

    async fn update(&self, rect: &Rectangle, cancel: CancellationToken) -> Result<Rectangle, ClientError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.put(rect) => result,
        }
    }
}

async fn read_record(resp: reqwest::Response) -> Result<Rectangle, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return resp
            .json::<Rectangle>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }
    let body = resp.text().await.unwrap_or_default();
    Err(error_for_status(status.as_u16(), body))
}

pub(crate) fn rectangle_endpoint(base_url: &str) -> String {
    format!("{}{RECTANGLE_PATH}", base_url.trim_end_matches('/'))
}

/// Map a failed HTTP status and its body onto the error taxonomy.
pub(crate) fn error_for_status(status: u16, body: String) -> ClientError {
    match status {
        400 => {
            let reason = body.trim();
            if reason.is_empty() {
                ClientError::Validation("Invalid rectangle.".to_owned())
            } else {
                ClientError::Validation(reason.to_owned())
            }
        }
        404 => ClientError::NotFound,
        _ => ClientError::Server { status },
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
