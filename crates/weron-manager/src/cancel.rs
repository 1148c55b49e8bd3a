//! Cancellation token passed explicitly into network calls.

use std::future;

use tokio::sync::watch;

/// Fires a paired [`Cancellation`].
#[derive(Debug)]
pub struct CancellationHandle {
    sender: watch::Sender<bool>,
}

impl CancellationHandle {
    /// Signal cancellation. Repeated calls are no-ops.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

/// Observes a cancellation signal.
///
/// Dropping the handle without calling [`CancellationHandle::cancel`] leaves the
/// token uncancelled forever.
#[derive(Debug, Clone)]
pub struct Cancellation {
    receiver: watch::Receiver<bool>,
}

/// Create a connected handle/token pair.
#[must_use]
pub fn cancellation() -> (CancellationHandle, Cancellation) {
    let (sender, receiver) = watch::channel(false);
    (CancellationHandle { sender }, Cancellation { receiver })
}

impl Cancellation {
    /// A token that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_handle, token) = cancellation();
        token
    }

    /// Whether cancellation has already been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once cancellation is signalled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, timeout};

    #[tokio::test]
    async fn cancel_wakes_waiters() {
        let (handle, token) = cancellation();
        assert!(!token.is_cancelled());

        let waiter = token.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });
        handle.cancel();
        handle.cancel();

        assert!(timeout(Duration::from_secs(1), task).await.is_ok());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn already_cancelled_token_resolves_immediately() {
        let (handle, token) = cancellation();
        handle.cancel();
        drop(handle);
        assert!(token.is_cancelled());
        assert!(
            timeout(Duration::from_millis(100), token.cancelled())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn never_token_stays_pending() {
        let token = Cancellation::never();
        assert!(!token.is_cancelled());
        assert!(
            timeout(Duration::from_millis(50), token.cancelled())
                .await
                .is_err()
        );
    }
}
