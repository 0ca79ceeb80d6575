//! SubmitAnswersHandler - a rater recording answers on their assignment.

use std::sync::Arc;

use crate::domain::assessment::{Answer, Feedback, Rating};
use crate::domain::foundation::{
    AssignmentId, AuthenticatedUser, DimensionId, DomainError, ErrorCode, Timestamp,
};
use crate::ports::{AnswerRepository, AssignmentRepository, FeedbackRepository};

/// One dimension rating within a submission.
#[derive(Debug, Clone)]
pub struct AnswerInput {
    pub dimension_id: DimensionId,
    pub rating: u8,
}

/// Command carrying one submission for an assignment.
#[derive(Debug, Clone)]
pub struct SubmitAnswersCommand {
    pub actor: AuthenticatedUser,
    pub assignment_id: AssignmentId,
    pub answers: Vec<AnswerInput>,
    pub feedback: Option<String>,
    /// True marks the assignment completed after recording the answers.
    pub complete: bool,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitAnswersResult {
    pub recorded: usize,
    pub completed: bool,
}

/// Handler recording a rater's answers.
///
/// Only the owning rater - or an admin allowed to manage the assignment's
/// client - may submit; anyone else gets a Forbidden error regardless of
/// whether the assignment exists in their view.
pub struct SubmitAnswersHandler {
    assignments: Arc<dyn AssignmentRepository>,
    answers: Arc<dyn AnswerRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl SubmitAnswersHandler {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        answers: Arc<dyn AnswerRepository>,
        feedback: Arc<dyn FeedbackRepository>,
    ) -> Self {
        Self {
            assignments,
            answers,
            feedback,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswersCommand,
    ) -> Result<SubmitAnswersResult, DomainError> {
        let mut assignment = self
            .assignments
            .find_by_id(&cmd.assignment_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AssignmentNotFound, "Assignment not found")
            })?;

        // Ownership check: the rater themselves or a managing admin.
        if !cmd
            .actor
            .can_act_for(&assignment.profile_id, &assignment.client_id)
        {
            return Err(DomainError::forbidden(
                "Only the assigned rater can submit answers",
            ));
        }

        let now = Timestamp::now();
        assignment.start(now)?;

        // Validate every rating before writing anything.
        let mut answers = Vec::with_capacity(cmd.answers.len());
        for input in &cmd.answers {
            let rating = Rating::try_new(input.rating)?;
            answers.push(Answer::new(cmd.assignment_id, input.dimension_id, rating));
        }

        if !answers.is_empty() {
            self.answers.save_all(&answers).await?;
        }

        if let Some(body) = cmd.feedback.as_deref() {
            if !body.trim().is_empty() {
                let feedback = Feedback::new(cmd.assignment_id, body)?;
                self.feedback.save(&feedback).await?;
            }
        }

        if cmd.complete {
            assignment.complete(now)?;
        }
        self.assignments.update(&assignment).await?;

        tracing::info!(
            assignment_id = %cmd.assignment_id,
            recorded = answers.len(),
            completed = cmd.complete,
            "Answers submitted"
        );
        Ok(SubmitAnswersResult {
            recorded: answers.len(),
            completed: cmd.complete,
        })
    }
}
