//! Answer and feedback repository ports.

use async_trait::async_trait;

use crate::domain::assessment::{Answer, Feedback};
use crate::domain::foundation::{AssignmentId, DomainError};

/// Persistent storage for [`Answer`] rows.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Persist a whole submission atomically.
    async fn save_all(&self, answers: &[Answer]) -> Result<(), DomainError>;

    async fn list_by_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Answer>, DomainError>;
}

/// Persistent storage for [`Feedback`] rows.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn save(&self, feedback: &Feedback) -> Result<(), DomainError>;

    async fn list_by_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<Feedback>, DomainError>;
}
