//! Auto-refresh and stale-response suppression.
//!
//! [`Poller`] re-fetches on a fixed interval (no backoff, no jitter) and
//! publishes the latest value on a watch channel. [`LatestOnly`] lets a view
//! discard responses to requests that a newer request has superseded.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Background task that refreshes a value on a fixed interval.
///
/// Dropping the poller stops it.
#[derive(Debug)]
pub struct Poller<T> {
    receiver: watch::Receiver<Option<T>>,
    handle: JoinHandle<()>,
}

impl<T> Poller<T>
where
    T: Send + Sync + 'static,
{
    /// ## Summary
    /// Spawns a task calling `fetch` immediately and then every `interval`.
    ///
    /// Failed fetches are logged and the previous value is kept; the next
    /// attempt happens on the following tick.
    #[must_use = "dropping the poller stops it"]
    pub fn spawn<F, Fut, E>(name: &'static str, interval: Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let (sender, receiver) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match fetch().await {
                    Ok(value) => {
                        tracing::trace!(poller = name, "Refreshed");
                        if sender.send(Some(value)).is_err() {
                            tracing::debug!(poller = name, "No subscribers left, stopping");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(poller = name, error = %e, "Refresh failed");
                    }
                }
            }
        });

        Self { receiver, handle }
    }

    /// New receiver observing every published value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.receiver.clone()
    }

    /// Most recent successful value, if any.
    #[must_use]
    pub fn latest(&self) -> Option<T>
    where
        T: Clone,
    {
        self.receiver.borrow().clone()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Generation counter deciding whether a response is still wanted.
#[derive(Debug, Clone, Default)]
pub struct LatestOnly {
    generation: Arc<AtomicU64>,
}

/// Marker for one in-flight request.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LatestOnly {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, superseding every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RequestTicket {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Supersedes all outstanding tickets, e.g. when the view goes away.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl RequestTicket {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    /// Passes `value` through only if no newer request has started.
    #[must_use]
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            tracing::trace!(generation = self.generation, "Discarding stale response");
            None
        }
    }
}

#[cfg(test)]
mod tests;
