//! Group repository port.

use async_trait::async_trait;

use crate::domain::directory::Group;
use crate::domain::foundation::{ClientId, DomainError, GroupId, ProfileId};

/// Persistent storage for [`Group`] aggregates and their memberships.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn save(&self, group: &Group) -> Result<(), DomainError>;

    /// Persist a whole batch atomically; used by bulk uploads.
    async fn save_all(&self, groups: &[Group]) -> Result<(), DomainError>;

    async fn update(&self, group: &Group) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError>;

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Group>, DomainError>;

    async fn add_member(&self, group_id: &GroupId, profile_id: &ProfileId)
        -> Result<(), DomainError>;

    async fn remove_member(
        &self,
        group_id: &GroupId,
        profile_id: &ProfileId,
    ) -> Result<(), DomainError>;

    async fn list_members(&self, group_id: &GroupId) -> Result<Vec<ProfileId>, DomainError>;

    async fn delete(&self, id: &GroupId) -> Result<(), DomainError>;
}
