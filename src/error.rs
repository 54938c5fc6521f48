//! Error types for the onboarding workflow
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Sync Error Enum ==
/// Unified error type for the onboarding workflow.
///
/// Remote failures are classified by the operation that produced them and
/// otherwise passed through unchanged.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A search or lookup request was rejected by the API
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// A create request was rejected by the API
    #[error("Creation failed: {0}")]
    Creation(String),

    /// A file upload was rejected by the API
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Transport-level failure talking to the API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local I/O failure, e.g. reading the file to upload
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the onboarding workflow.
pub type Result<T> = std::result::Result<T, SyncError>;
