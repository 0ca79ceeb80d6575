//! Assignment repository port.

use async_trait::async_trait;

use crate::domain::assessment::Assignment;
use crate::domain::foundation::{AssignmentId, ClientId, DomainError, ProfileId};

/// Persistent storage for [`Assignment`] aggregates.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn save(&self, assignment: &Assignment) -> Result<(), DomainError>;

    async fn update(&self, assignment: &Assignment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AssignmentId) -> Result<Option<Assignment>, DomainError>;

    /// Assignments the given profile is the rater of.
    async fn list_by_rater(&self, profile_id: &ProfileId)
        -> Result<Vec<Assignment>, DomainError>;

    /// Assignments rating the given target.
    async fn list_by_target(
        &self,
        target_id: &ProfileId,
    ) -> Result<Vec<Assignment>, DomainError>;

    async fn list_by_client(&self, client_id: &ClientId)
        -> Result<Vec<Assignment>, DomainError>;

    async fn delete(&self, id: &AssignmentId) -> Result<(), DomainError>;
}
