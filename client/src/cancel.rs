//! Cooperative cancellation for in-flight updates.
//!
//! A [`CancellationSource`] hands out [`CancellationToken`]s. The network
//! layer races its request against [`CancellationToken::cancelled`] and stops
//! treating the response as applicable once the source fires. Nothing is
//! killed forcibly; the request future is simply dropped by whoever observes
//! the signal.

#[cfg(test)]
#[path = "cancel_test.rs"]
mod cancel_test;

use tokio::sync::watch;

/// The control handle that triggers cancellation.
///
/// Dropping the source does not cancel its tokens.
#[derive(Debug)]
pub struct CancellationSource {
    tx: watch::Sender<bool>,
}

/// Cloneable observer of a [`CancellationSource`].
#[derive(Debug, Clone)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken { rx: self.tx.subscribe() }
    }

    /// Signal cancellation to every token. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// A token whose source is already gone; it never fires.
    #[must_use]
    pub fn never() -> Self {
        CancellationSource::new().token()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested. Pends forever if the source
    /// was dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let source_gone = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if source_gone {
            std::future::pending::<()>().await;
        }
    }
}
