//! Client Module
//!
//! The remote API contract consumed by the workflow, plus an HTTP
//! implementation of it.
//!
//! # Operations
//! - User search and client creation
//! - All-staff group lookup
//! - Space search and creation
//! - File upload from a local path

mod http;

use std::future::Future;
use std::path::Path;

use crate::error::Result;
use crate::models::{
    CreateClientRequest, CreateSpaceRequest, FileUpload, FileViewModel, GroupViewModel,
    SearchResults, SpaceSearch, SpaceViewModel, UserSearch, UserViewModel,
};

pub use http::HttpFoyerClient;

// == Foyer API ==
/// Request/response contract of the remote collaboration API.
///
/// Implementations report failures unchanged; callers decide whether to retry.
pub trait FoyerApi: Send + Sync + 'static {
    /// Searches users by free-text query.
    fn search_users(
        &self,
        search: &UserSearch,
    ) -> impl Future<Output = Result<SearchResults<UserViewModel>>> + Send;

    /// Creates a client user.
    fn create_client(
        &self,
        request: &CreateClientRequest,
    ) -> impl Future<Output = Result<UserViewModel>> + Send;

    /// Fetches the well-known all-staff group.
    fn get_all_staff_group(&self) -> impl Future<Output = Result<GroupViewModel>> + Send;

    /// Searches spaces, e.g. by member.
    fn search_spaces(
        &self,
        search: &SpaceSearch,
    ) -> impl Future<Output = Result<SearchResults<SpaceViewModel>>> + Send;

    /// Creates a space with an initial member set.
    fn create_space(
        &self,
        request: &CreateSpaceRequest,
    ) -> impl Future<Output = Result<SpaceViewModel>> + Send;

    /// Uploads the bytes at `path` into `space_id` under `upload.name`.
    fn upload_file_from_local_path(
        &self,
        space_id: &str,
        upload: &FileUpload,
        path: &Path,
    ) -> impl Future<Output = Result<FileViewModel>> + Send;
}
