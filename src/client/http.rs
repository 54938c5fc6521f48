//! HTTP API Client
//!
//! reqwest implementation of [`FoyerApi`] speaking JSON with bearer-token auth.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::FoyerApi;
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::models::{
    CreateClientRequest, CreateSpaceRequest, FileUpload, FileViewModel, GroupViewModel,
    SearchResults, SpaceSearch, SpaceViewModel, UserSearch, UserViewModel,
};

// == HTTP Foyer Client ==
/// Talks to the remote API over HTTP.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpFoyerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpFoyerClient {
    // == Constructor ==
    /// Creates a client for `base_url` authenticating with `api_key`.
    ///
    /// # Arguments
    /// * `base_url` - API root, with or without a trailing slash
    /// * `api_key` - Sent as a bearer token on every request
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, &config.api_key, config.timeout())
    }

    /// Returns the API root this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // == Send ==
    /// Sends `request` and decodes a JSON body.
    ///
    /// Non-2xx responses become `fail(status + body)`; transport and decode
    /// failures keep their own variants.
    async fn send<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fail: fn(String) -> SyncError,
    ) -> Result<R> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request rejected with {}", status);
            let message = match body.trim() {
                "" => status.to_string(),
                body => format!("{}: {}", status, body),
            };
            return Err(fail(message));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl FoyerApi for HttpFoyerClient {
    async fn search_users(&self, search: &UserSearch) -> Result<SearchResults<UserViewModel>> {
        debug!("Searching users for {:?}", search.query);
        let request = self.http.get(self.url("/api/users")).query(search);
        self.send(request, SyncError::Lookup).await
    }

    async fn create_client(&self, request: &CreateClientRequest) -> Result<UserViewModel> {
        debug!("Creating client user {}", request.email);
        let request = self.http.post(self.url("/api/users/clients")).json(request);
        self.send(request, SyncError::Creation).await
    }

    async fn get_all_staff_group(&self) -> Result<GroupViewModel> {
        debug!("Fetching all staff group");
        let request = self.http.get(self.url("/api/groups/all-staff"));
        self.send(request, SyncError::Lookup).await
    }

    async fn search_spaces(&self, search: &SpaceSearch) -> Result<SearchResults<SpaceViewModel>> {
        debug!(
            "Searching spaces with {} member filter(s)",
            search.member_filters.len()
        );
        let request = self.http.post(self.url("/api/spaces/search")).json(search);
        self.send(request, SyncError::Lookup).await
    }

    async fn create_space(&self, request: &CreateSpaceRequest) -> Result<SpaceViewModel> {
        debug!("Creating space {:?}", request.name);
        let request = self.http.post(self.url("/api/spaces")).json(request);
        self.send(request, SyncError::Creation).await
    }

    async fn upload_file_from_local_path(
        &self,
        space_id: &str,
        upload: &FileUpload,
        path: &Path,
    ) -> Result<FileViewModel> {
        let bytes = tokio::fs::read(path).await?;
        debug!(
            "Uploading {} bytes from {} to space {}",
            bytes.len(),
            path.display(),
            space_id
        );

        let request = self
            .http
            .post(self.url(&format!("/api/spaces/{}/files", space_id)))
            .query(upload)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes);
        self.send(request, SyncError::Upload).await
    }
}

impl fmt::Debug for HttpFoyerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFoyerClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
