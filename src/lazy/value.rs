//! Lazy Value Module
//!
//! Defers an expensive or side-effecting asynchronous lookup until first use
//! and memoizes its first successful result.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::lazy::LazyStats;

type ProducerFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;
type Producer<T, E> = Box<dyn Fn() -> ProducerFuture<T, E> + Send + Sync>;

// == Slot ==
/// Stored value plus its access counters, guarded together.
struct Slot<T> {
    value: Option<T>,
    stats: LazyStats,
}

// == Lazy Value ==
/// An asynchronously produced value, computed at most once per successful
/// production.
///
/// The producer is not invoked at construction. The first call to
/// [`get`](LazyValue::get) runs it; a success is stored and returned to every
/// later caller, a failure is returned to the caller and leaves the slot
/// empty so the next `get` tries again.
///
/// The slot lock is held while the producer runs, so concurrent first callers
/// wait for a single production instead of racing. A `get` future dropped
/// mid-production leaves the slot empty.
pub struct LazyValue<T, E = SyncError> {
    /// Zero-argument asynchronous producer
    producer: Producer<T, E>,
    /// Memoized value and statistics
    slot: Mutex<Slot<T>>,
}

impl<T, E> LazyValue<T, E>
where
    T: Send + 'static,
    E: 'static,
{
    // == Constructor ==
    /// Creates a new LazyValue around `producer` without invoking it.
    ///
    /// # Arguments
    /// * `producer` - Called with no arguments; must be safe to call once
    ///   per `get` that finds the slot empty
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            producer: Box::new(move || -> ProducerFuture<T, E> { Box::pin(producer()) }),
            slot: Mutex::new(Slot {
                value: None,
                stats: LazyStats::new(),
            }),
        }
    }

    // == Get ==
    /// Returns the memoized value, producing it first if necessary.
    ///
    /// Producer errors are propagated unchanged and nothing is stored.
    pub async fn get(&self) -> Result<T, E>
    where
        T: Clone,
    {
        let mut slot = self.slot.lock().await;

        if let Some(value) = slot.value.as_ref().cloned() {
            slot.stats.record_hit();
            return Ok(value);
        }

        slot.stats.record_miss();
        debug!(
            "Lazy value empty, invoking producer (call #{})",
            slot.stats.misses
        );

        match (self.producer)().await {
            Ok(value) => {
                slot.value = Some(value.clone());
                slot.stats.mark_initialized();
                Ok(value)
            }
            Err(err) => {
                slot.stats.record_failure();
                warn!("Lazy value producer failed, slot left empty");
                Err(err)
            }
        }
    }

    // == Is Initialized ==
    /// Returns true once a value has been stored.
    pub async fn is_initialized(&self) -> bool {
        self.slot.lock().await.value.is_some()
    }

    // == Stats ==
    /// Returns a snapshot of the access counters.
    pub async fn stats(&self) -> LazyStats {
        self.slot.lock().await.stats.clone()
    }
}

impl<T: fmt::Debug, E> fmt::Debug for LazyValue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("LazyValue");
        match self.slot.try_lock() {
            Ok(slot) => out.field("value", &slot.value),
            Err(_) => out.field("value", &format_args!("<producing>")),
        };
        out.finish_non_exhaustive()
    }
}
