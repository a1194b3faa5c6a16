//! Delays delivery of a value until input settles.
//!
//! Used by the search box: the displayed input value updates on every
//! keystroke, but the applied search term only updates once the user has
//! stopped typing for the wait window.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};

/// Debounces a stream of values.
///
/// Each [`Debouncer::call`] cancels the previously scheduled delivery and
/// reschedules, so only the most recent value within a quiet window
/// reaches the receiver. Must be used inside a tokio runtime.
pub struct Debouncer<T> {
    wait: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer with the given quiet window, along with the
    /// receiver that settled values arrive on.
    pub fn new(wait: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                wait,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Schedule `value` for delivery after the quiet window, cancelling
    /// any previously scheduled value.
    pub fn call(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let wait = self.wait;

        self.pending = Some(tokio::spawn(async move {
            time::sleep(wait).await;
            // The receiver may already be gone; nothing left to deliver to.
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
