//! Request Coalescing Module
//!
//! Single-flight deduplication for asynchronous producers: concurrent
//! callers asking for the same key share one underlying operation and all
//! observe its outcome, value or error alike.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::debug;

/// Shared handle to the eventual outcome of one in-flight operation.
type SharedOutcome<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

// == Request Coalescer ==
/// Collapses concurrent identical requests into a single producer run.
///
/// For any key, at most one operation is in flight at a time. The first
/// caller registers a shared future wrapping its producer; callers arriving
/// while it is pending join that future instead of running their own
/// producer. Once the operation settles the registration is removed, so the
/// next call for the key starts fresh.
///
/// The coalescer is cheaply cloneable; clones share the same pending table.
pub struct RequestCoalescer<T, E> {
    /// Pending registrations, one per in-flight key
    pending: Arc<Mutex<HashMap<String, SharedOutcome<T, E>>>>,
}

impl<T, E> Clone for RequestCoalescer<T, E> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<T, E> Default for RequestCoalescer<T, E> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T, E> RequestCoalescer<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a new coalescer with no pending operations.
    pub fn new() -> Self {
        Self::default()
    }

    // == Coalesce ==
    /// Runs `operation` for `key`, or joins the one already in flight.
    ///
    /// If no operation is pending for `key`, `operation` is registered and
    /// its outcome is shared; otherwise `operation` is never invoked and
    /// the caller awaits the pending outcome. Every joiner of a
    /// registration receives the same value or the same (cloned) error;
    /// failures are propagated verbatim, never retried or transformed.
    ///
    /// The check-and-register step happens under the pending-table lock and
    /// `operation` is not polled until the lock is released, so two
    /// near-simultaneous callers can never both invoke their producer. The
    /// registration is removed by the shared future itself when the
    /// operation settles, on the success and failure paths alike.
    pub async fn coalesce<F, Fut>(&self, key: &str, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let shared = {
            let mut pending = self.pending.lock().await;

            if let Some(existing) = pending.get(key) {
                debug!(key, "joining in-flight operation");
                existing.clone()
            } else {
                debug!(key, "registering in-flight operation");
                let registry = Arc::clone(&self.pending);
                let owned_key = key.to_string();
                let producer = operation();

                // Cleanup lives inside the shared future so it runs exactly
                // once when the operation settles, regardless of outcome or
                // of how many callers joined.
                let outcome = async move {
                    let result = producer.await;
                    registry.lock().await.remove(&owned_key);
                    debug!(key = %owned_key, "in-flight operation settled");
                    result
                }
                .boxed()
                .shared();

                pending.insert(key.to_string(), outcome.clone());
                outcome
            }
        };

        shared.await
    }

    // == Pending Count ==
    /// Number of keys with an operation currently in flight.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}
