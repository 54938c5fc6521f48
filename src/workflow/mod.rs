//! Workflow Module
//!
//! Orchestration over the remote API: find-or-create a client user,
//! find-or-create their space, upload a file into it.

mod onboarding;

pub use onboarding::{SpaceOnboarding, WorkflowSettings};
