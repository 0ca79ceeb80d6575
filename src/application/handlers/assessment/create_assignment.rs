//! CreateAssignmentHandler - admin fan-out of assessment instances.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentKind, Assignment};
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, ProfileId, Timestamp,
};
use crate::domain::scoring::RaterRelation;
use crate::ports::{AssignmentRepository, ProfileRepository};

/// Command to create one assignment.
#[derive(Debug, Clone)]
pub struct CreateAssignmentCommand {
    pub actor: AuthenticatedUser,
    pub profile_id: ProfileId,
    pub target_profile_id: ProfileId,
    pub kind: AssessmentKind,
    pub relation: RaterRelation,
    pub expires_at: Option<Timestamp>,
}

/// Result of a successful creation.
#[derive(Debug, Clone)]
pub struct CreateAssignmentResult {
    pub assignment: Assignment,
}

/// Handler creating assignments after authorization and referential checks.
pub struct CreateAssignmentHandler {
    profiles: Arc<dyn ProfileRepository>,
    assignments: Arc<dyn AssignmentRepository>,
}

impl CreateAssignmentHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            profiles,
            assignments,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAssignmentCommand,
    ) -> Result<CreateAssignmentResult, DomainError> {
        // 1. Both profiles must exist; they define the owning client.
        let rater = self
            .profiles
            .find_by_id(&cmd.profile_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ProfileNotFound, "Rater profile not found"))?;

        let target = self
            .profiles
            .find_by_id(&cmd.target_profile_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProfileNotFound, "Target profile not found")
            })?;

        // 2. Assignments never span clients.
        if rater.client_id != target.client_id {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Rater and target belong to different clients",
            ));
        }

        // 3. Only an admin of the owning client can assign.
        if !cmd.actor.can_manage_client(&rater.client_id) {
            return Err(DomainError::forbidden(
                "Only client admins can create assignments",
            ));
        }

        // 4. Build and persist.
        let assignment = Assignment::new(
            rater.client_id,
            cmd.profile_id,
            cmd.target_profile_id,
            cmd.kind,
            cmd.relation,
            cmd.expires_at,
        )?;
        self.assignments.save(&assignment).await?;

        tracing::info!(
            assignment_id = %assignment.id,
            rater = %assignment.profile_id,
            target = %assignment.target_profile_id,
            kind = %assignment.kind,
            "Assignment created"
        );
        Ok(CreateAssignmentResult { assignment })
    }
}
