//! Space Onboard - client onboarding against a hosted collaboration API
//!
//! Finds or creates a client user and a space containing them, then uploads
//! a local file into that space. The all-staff group used as a default space
//! member is looked up lazily and memoized.

pub mod client;
pub mod config;
pub mod error;
pub mod lazy;
pub mod models;
pub mod workflow;

pub use client::{FoyerApi, HttpFoyerClient};
pub use config::Config;
pub use error::{Result, SyncError};
pub use lazy::{LazyStats, LazyValue};
pub use workflow::{SpaceOnboarding, WorkflowSettings};
