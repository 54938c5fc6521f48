//! Configuration Module
//!
//! Handles loading the API endpoint, credentials and workflow settings from
//! environment variables.

use std::env;
use std::time::Duration;

use crate::error::{Result, SyncError};

/// Environment variable holding the API base URL.
pub const URL_VAR: &str = "FOYER_EXAMPLE_URL";
/// Environment variable holding the API key.
pub const KEY_VAR: &str = "FOYER_EXAMPLE_KEY";

/// Workflow configuration parameters.
///
/// The endpoint and key are required; everything else has a default.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the remote API
    pub api_url: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// Name given to newly created spaces
    pub space_name: String,
    /// Name the uploaded file is stored under
    pub upload_file_name: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FOYER_EXAMPLE_URL` - API base URL (required)
    /// - `FOYER_EXAMPLE_KEY` - API key (required)
    /// - `SPACE_NAME` - Name for new spaces (default: "Quarterly Report")
    /// - `UPLOAD_FILE_NAME` - Stored file name (default: "TestFile.json")
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds, zero ignored (default: 30)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            api_url: required(URL_VAR)?,
            api_key: required(KEY_VAR)?,
            space_name: env::var("SPACE_NAME").unwrap_or(defaults.space_name),
            upload_file_name: env::var("UPLOAD_FILE_NAME").unwrap_or(defaults.upload_file_name),
            request_timeout: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout),
        })
    }

    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SyncError::Config(format!("{} is not set", name))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            space_name: "Quarterly Report".to_string(),
            upload_file_name: "TestFile.json".to_string(),
            request_timeout: 30,
        }
    }
}

// The key never shows up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("space_name", &self.space_name)
            .field("upload_file_name", &self.upload_file_name)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
