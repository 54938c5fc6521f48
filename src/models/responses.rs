//! Response DTOs for the remote API
//!
//! Defines the structure of incoming HTTP response bodies. Unknown fields are
//! ignored so the models keep working as the API grows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Paged search result envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults<T> {
    /// Total number of matches
    pub count: usize,
    /// Matches on this page
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> SearchResults<T> {
    /// Returns the first match, or None when the search found nothing.
    pub fn into_first(self) -> Option<T> {
        if self.count > 0 {
            self.results.into_iter().next()
        } else {
            None
        }
    }
}

impl<T> Default for SearchResults<T> {
    fn default() -> Self {
        Self {
            count: 0,
            results: Vec::new(),
        }
    }
}

/// A user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserViewModel {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A user group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupViewModel {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A collaboration space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceViewModel {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// An uploaded file record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileViewModel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
