//! Request and Response models for the remote API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    CreateClientRequest, CreateSpaceRequest, FileUpload, MemberFilter, SpaceMembers, SpaceSearch,
    UserSearch,
};
pub use responses::{FileViewModel, GroupViewModel, SearchResults, SpaceViewModel, UserViewModel};
