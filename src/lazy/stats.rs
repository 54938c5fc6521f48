//! Lazy Value Statistics Module
//!
//! Tracks how often a lazy value was served from its slot versus produced.

use serde::Serialize;

// == Lazy Stats ==
/// Tracks access and production counters for a lazy value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LazyStats {
    /// Number of `get` calls answered from the stored value
    pub hits: u64,
    /// Number of `get` calls that found the slot empty and ran the producer
    pub misses: u64,
    /// Number of producer invocations that returned an error
    pub failures: u64,
    /// Whether a value is currently stored
    pub initialized: bool,
}

impl LazyStats {
    // == Constructor ==
    /// Creates a new LazyStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if `get` was never called.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter. Every miss invokes the producer once.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Failure ==
    /// Increments the failure counter.
    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    // == Mark Initialized ==
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}
