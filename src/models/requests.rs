//! Request DTOs for the remote API
//!
//! Defines the structure of outgoing HTTP request bodies and query strings.

use serde::Serialize;

/// Free-text user search (GET /api/users)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSearch {
    /// Matched against name and email
    pub query: String,
}

impl UserSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Request body for creating a client user (POST /api/users/clients)
///
/// # Fields
/// - `make_default_space`: when true the API creates a space for the user
/// - `send_registration_email`: when true the API sends its own invitation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub make_default_space: bool,
    pub send_registration_email: bool,
}

/// Restricts a space search to spaces having `user_id` as a member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberFilter {
    pub user_id: String,
}

/// Request body for searching spaces (POST /api/spaces/search)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpaceSearch {
    pub member_filters: Vec<MemberFilter>,
}

impl SpaceSearch {
    /// Search for spaces that have the given user as a member.
    pub fn for_member(user_id: impl Into<String>) -> Self {
        Self {
            member_filters: vec![MemberFilter {
                user_id: user_id.into(),
            }],
        }
    }
}

/// Initial member set of a new space
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpaceMembers {
    /// User ids
    pub users: Vec<String>,
    /// Group ids
    pub groups: Vec<String>,
}

/// Request body for creating a space (POST /api/spaces)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    pub members: SpaceMembers,
}

/// Metadata for a file upload (query string of POST /api/spaces/:id/files)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileUpload {
    /// Name the file is stored under in the space
    pub name: String,
}
