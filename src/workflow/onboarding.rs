//! Space Onboarding Workflow
//!
//! Find-or-create a client user, find-or-create a space for them, and upload
//! a local file into it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::client::FoyerApi;
use crate::config::Config;
use crate::error::Result;
use crate::lazy::{LazyStats, LazyValue};
use crate::models::{
    CreateClientRequest, CreateSpaceRequest, FileUpload, FileViewModel, GroupViewModel,
    SpaceMembers, SpaceSearch, SpaceViewModel, UserSearch, UserViewModel,
};

// == Workflow Settings ==
/// Fixed choices the workflow makes on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Name given to newly created spaces
    pub space_name: String,
    /// Name uploaded files are stored under
    pub upload_name: String,
    /// Ask the API to create a space for new users automatically
    pub make_default_space: bool,
    /// Ask the API to send its own invitation email to new users
    pub send_registration_email: bool,
}

impl WorkflowSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            space_name: config.space_name.clone(),
            upload_name: config.upload_file_name.clone(),
            ..Self::default()
        }
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            space_name: "Quarterly Report".to_string(),
            upload_name: "TestFile.json".to_string(),
            make_default_space: false,
            send_registration_email: false,
        }
    }
}

// == Space Onboarding ==
/// Workflow context: the API client plus the lookups it memoizes.
///
/// Each instance owns its own all-staff group cache, so separate instances
/// (and tests) never share state.
pub struct SpaceOnboarding<C: FoyerApi> {
    client: Arc<C>,
    all_staff_group: LazyValue<GroupViewModel>,
    settings: WorkflowSettings,
}

impl<C: FoyerApi> SpaceOnboarding<C> {
    // == Constructor ==
    /// Creates a workflow over `client`. No requests are made until an
    /// operation runs.
    pub fn new(client: C, settings: WorkflowSettings) -> Self {
        let client = Arc::new(client);
        let lookup = Arc::clone(&client);
        let all_staff_group = LazyValue::new(move || {
            let client = Arc::clone(&lookup);
            async move { client.get_all_staff_group().await }
        });

        Self {
            client,
            all_staff_group,
            settings,
        }
    }

    /// Returns the underlying API client.
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Access counters of the all-staff group cache.
    pub async fn all_staff_group_stats(&self) -> LazyStats {
        self.all_staff_group.stats().await
    }

    // == Add File To Client Space ==
    /// Ensures a client user with `email` and a space containing them exist,
    /// then uploads the file at `file_path` into that space.
    ///
    /// Nothing is rolled back if a later step fails.
    pub async fn add_file_to_client_space(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        file_path: &Path,
    ) -> Result<FileViewModel> {
        let user = self.add_or_get_client(first_name, last_name, email).await?;
        let space = self.add_or_get_space_for_user(&user.id).await?;
        let file = self.upload_local_file(&space.id, file_path).await?;

        info!(
            "Uploaded {} as file {} into space {} for user {}",
            file_path.display(),
            file.id,
            space.id,
            user.id
        );
        Ok(file)
    }

    // == Add Or Get Client ==
    /// Returns the first user matching `email`, creating a client user from
    /// the given details only when none exists.
    pub async fn add_or_get_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<UserViewModel> {
        if let Some(user) = self.find_user(email).await? {
            debug!("Found existing user {} for {}", user.id, email);
            return Ok(user);
        }
        self.create_client_user(first_name, last_name, email).await
    }

    // == Add Or Get Space For User ==
    /// Returns the first space with `user_id` as a member, creating one when
    /// none exists.
    pub async fn add_or_get_space_for_user(&self, user_id: &str) -> Result<SpaceViewModel> {
        if let Some(space) = self.find_space_for_user(user_id).await? {
            debug!("Found existing space {} for user {}", space.id, user_id);
            return Ok(space);
        }
        self.create_space_for_user(user_id).await
    }

    // == Create Client User ==
    pub async fn create_client_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<UserViewModel> {
        let request = CreateClientRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            make_default_space: self.settings.make_default_space,
            send_registration_email: self.settings.send_registration_email,
        };

        let user = self.client.create_client(&request).await?;
        info!("Created client user {} for {}", user.id, email);
        Ok(user)
    }

    // == Upload Local File ==
    /// Uploads the file at `path` into `space_id` under the configured name.
    pub async fn upload_local_file(&self, space_id: &str, path: &Path) -> Result<FileViewModel> {
        let upload = FileUpload {
            name: self.settings.upload_name.clone(),
        };
        self.client
            .upload_file_from_local_path(space_id, &upload, path)
            .await
    }

    // == Create Space For User ==
    /// Creates a space whose members are `user_id` and the all-staff group.
    ///
    /// The all-staff group is looked up once per workflow instance.
    pub async fn create_space_for_user(&self, user_id: &str) -> Result<SpaceViewModel> {
        let all_staff = self.all_staff_group.get().await?;
        let request = CreateSpaceRequest {
            name: self.settings.space_name.clone(),
            members: SpaceMembers {
                users: vec![user_id.to_string()],
                groups: vec![all_staff.id],
            },
        };

        let space = self.client.create_space(&request).await?;
        info!("Created space {} for user {}", space.id, user_id);
        Ok(space)
    }

    // == Find Space For User ==
    /// Returns the first space with `user_id` as a member, if any.
    pub async fn find_space_for_user(&self, user_id: &str) -> Result<Option<SpaceViewModel>> {
        let results = self
            .client
            .search_spaces(&SpaceSearch::for_member(user_id))
            .await?;
        Ok(results.into_first())
    }

    // == Find User ==
    /// Returns the first user matching `query`, if any.
    pub async fn find_user(&self, query: &str) -> Result<Option<UserViewModel>> {
        let results = self.client.search_users(&UserSearch::new(query)).await?;
        Ok(results.into_first())
    }
}
