//! Debounced, staleness-checked coordination of user-driven queries.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::error::RateError;

/// Lifecycle of one logical query slot.
///
/// `Resolved` and `Failed` are re-enterable: any new input restarts the
/// cycle from the top.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Pending,
    Resolved(T),
    Failed(String),
}

struct ArmedTimer {
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

/// One logical query slot: collapses rapid input changes into a single
/// deferred query and discards stale responses.
///
/// Every [`submit`](QuerySlot::submit) or [`clear`](QuerySlot::clear) bumps
/// the slot epoch. The armed debounce timer is cancelled outright; a query
/// already in flight is left to finish, but its result is applied only if
/// its captured epoch still matches (soft cancellation).
pub struct QuerySlot<T> {
    state: Arc<Mutex<QueryState<T>>>,
    epoch: Arc<AtomicU64>,
    /// Bumped on every state write, so consumers can tell a freshly applied
    /// result apart from a stale read even when the value is identical.
    version: Arc<AtomicU64>,
    window: Duration,
    timer: std::sync::Mutex<Option<ArmedTimer>>,
}

impl<T> QuerySlot<T>
where
    T: Send + Clone + 'static,
{
    pub fn new(window: Duration) -> Self {
        QuerySlot {
            state: Arc::new(Mutex::new(QueryState::Idle)),
            epoch: Arc::new(AtomicU64::new(0)),
            version: Arc::new(AtomicU64::new(0)),
            window,
            timer: std::sync::Mutex::new(None),
        }
    }

    pub async fn state(&self) -> QueryState<T> {
        self.state.lock().await.clone()
    }

    /// Monotonic counter of state writes. Two reads returning the same
    /// version are guaranteed to have seen the same state application.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Degenerate inputs: invalidate any deferred or in-flight work and
    /// settle back to `Idle` without issuing a query.
    pub async fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cancel_armed_timer();
        *self.state.lock().await = QueryState::Idle;
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    /// Arms the quiescence window for a new set of inputs.
    ///
    /// `query` runs only if no newer submit or clear arrives before the
    /// window elapses. Its eventual result lands only if the slot epoch is
    /// still the one captured here.
    pub fn submit<F, Fut>(&self, query: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, RateError>> + Send + 'static,
    {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_armed_timer();

        let state = Arc::clone(&self.state);
        let current_epoch = Arc::clone(&self.epoch);
        let version = Arc::clone(&self.version);
        let window = self.window;
        let fired = Arc::new(AtomicBool::new(false));
        let fired_flag = Arc::clone(&fired);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            fired_flag.store(true, Ordering::SeqCst);

            if current_epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            *state.lock().await = QueryState::Pending;
            version.fetch_add(1, Ordering::SeqCst);

            let outcome = query().await;

            if current_epoch.load(Ordering::SeqCst) != epoch {
                debug!(epoch, "discarding stale query response");
                return;
            }
            *state.lock().await = match outcome {
                Ok(value) => QueryState::Resolved(value),
                Err(err) => QueryState::Failed(err.to_string()),
            };
            version.fetch_add(1, Ordering::SeqCst);
        });

        if let Ok(mut slot) = self.timer.lock() {
            *slot = Some(ArmedTimer { handle, fired });
        }
    }

}

impl<T> QuerySlot<T> {
    /// Aborts the timer task only while it is still waiting out the window.
    /// Once fired, the task is in (or past) the query and the epoch check
    /// takes over.
    fn cancel_armed_timer(&self) {
        if let Ok(mut slot) = self.timer.lock() {
            if let Some(timer) = slot.take() {
                if !timer.fired.load(Ordering::SeqCst) {
                    timer.handle.abort();
                }
            }
        }
    }
}

impl<T> Drop for QuerySlot<T> {
    fn drop(&mut self) {
        self.cancel_armed_timer();
    }
}
