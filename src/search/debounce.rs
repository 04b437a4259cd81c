//! Cancellable delayed callbacks
//!
//! Each `schedule` replaces whatever was pending, so an event is only
//! delivered once input has been quiet for the whole delay.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

#[derive(Debug)]
pub struct Debouncer<E> {
    delay: Duration,
    tx: UnboundedSender<E>,
    pending: Option<JoinHandle<()>>,
}

impl<E: Send + 'static> Debouncer<E> {
    pub fn new(delay: Duration, tx: UnboundedSender<E>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Deliver `event` after the delay, cancelling any pending delivery
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&mut self, event: E) {
        self.cancel();

        let deadline = Instant::now() + self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // Receiver gone means the owner was torn down
            let _ = tx.send(event);
        }));
    }

    /// Cancel the pending delivery; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl<E> Drop for Debouncer<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
