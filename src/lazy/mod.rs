//! Lazy Module
//!
//! Memoizes the first successful result of an asynchronous producer.

mod stats;
mod value;


// Re-export public types
pub use stats::LazyStats;
pub use value::LazyValue;
