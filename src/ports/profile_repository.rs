//! Profile repository port.

use async_trait::async_trait;

use crate::domain::directory::Profile;
use crate::domain::foundation::{ClientId, DomainError, ProfileId};

/// Persistent storage for [`Profile`] aggregates.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn save(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Persist a whole batch atomically; used by bulk uploads.
    async fn save_all(&self, profiles: &[Profile]) -> Result<(), DomainError>;

    async fn update(&self, profile: &Profile) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, DomainError>;

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Profile>, DomainError>;

    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError>;
}
