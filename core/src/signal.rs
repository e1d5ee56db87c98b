//! Completion Signal
//!
//! A single-fire flag marking that the real network outcome of a turn has
//! arrived. The coordinator holds the only [`CompletionSignal`] (the writer);
//! the animation player holds [`CompletionObserver`]s (readers).
//!
//! Settlement consumes the writer, so a signal can be settled at most once and
//! never un-settled. A signal dropped without settling counts as settled for
//! observers: nothing could ever settle it afterwards, and an animation
//! waiting on it must not run forever.

use tokio::sync::watch;

/// Writer half of a completion signal
#[derive(Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<bool>,
}

impl CompletionSignal {
    /// Create an unsettled signal
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Create an observer of this signal
    #[must_use]
    pub fn observer(&self) -> CompletionObserver {
        CompletionObserver {
            rx: self.tx.subscribe(),
        }
    }

    /// Settle the signal, waking every observer
    pub fn settle(self) {
        self.tx.send_replace(true);
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Reader half of a completion signal
#[derive(Clone, Debug)]
pub struct CompletionObserver {
    rx: watch::Receiver<bool>,
}

impl CompletionObserver {
    /// Poll the signal without waiting
    #[must_use]
    pub fn is_settled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Wait until the signal settles (or its writer is dropped)
    pub async fn settled(&self) {
        let mut rx = self.rx.clone();
        // Err: writer dropped unsettled, which observers treat as settled
        let _ = rx.wait_for(|settled| *settled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready};

    #[test]
    fn test_new_signal_is_pending() {
        let signal = CompletionSignal::new();
        let observer = signal.observer();
        assert!(!observer.is_settled());
    }

    #[test]
    fn test_settle_is_observed_and_permanent() {
        let signal = CompletionSignal::new();
        let a = signal.observer();
        let b = a.clone();

        signal.settle();

        assert!(a.is_settled());
        assert!(b.is_settled());
        // Still settled on a second look
        assert!(a.is_settled());
    }

    #[test]
    fn test_settled_future_wakes_on_settle() {
        let signal = CompletionSignal::new();
        let observer = signal.observer();

        let mut settled = tokio_test::task::spawn(observer.settled());
        assert_pending!(settled.poll());

        signal.settle();

        assert!(settled.is_woken());
        assert_ready!(settled.poll());
    }

    #[test]
    fn test_settled_future_ready_when_already_settled() {
        let signal = CompletionSignal::new();
        let observer = signal.observer();
        signal.settle();

        let mut settled = tokio_test::task::spawn(observer.settled());
        assert_ready!(settled.poll());
    }

    #[test]
    fn test_dropped_signal_counts_as_settled() {
        let signal = CompletionSignal::new();
        let observer = signal.observer();
        drop(signal);

        assert!(observer.is_settled());
        let mut settled = tokio_test::task::spawn(observer.settled());
        assert_ready!(settled.poll());
    }
}
