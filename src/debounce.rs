//! Last-edit-wins debouncing on the tokio timer

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Holds the most recent value until it has been stable for `window`.
///
/// Every [`push`](Debouncer::push) moves the deadline; [`ready`](Debouncer::ready)
/// resolves once the deadline passes with the latest value. `ready` is
/// cancel-safe, so it can sit in a `tokio::select!` loop next to the source
/// of new values.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiescence window
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.window));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without firing
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Wait for the pending value to settle; never resolves while idle
    pub async fn ready(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(_, at)| *at) else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        match self.pending.take() {
            Some((value, _)) => value,
            None => std::future::pending().await,
        }
    }
}
