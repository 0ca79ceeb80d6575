//! HTTP DTOs for assignment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{AssessmentKind, Assignment, AssignmentStatus};
use crate::domain::scoring::RaterRelation;

/// Request to create an assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub profile_id: String,
    pub target_profile_id: String,
    pub kind: AssessmentKind,
    pub relation: RaterRelation,
    /// RFC 3339 deadline, optional.
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One rating within a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerPayload {
    pub dimension_id: String,
    pub rating: u8,
}

/// PATCH body: a rater submitting answers and optionally completing.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    #[serde(default)]
    pub answers: Vec<AnswerPayload>,
    pub feedback: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

/// Query parameters for listing assignments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAssignmentsQuery {
    pub client_id: Option<String>,
    pub target_id: Option<String>,
}

/// Assignment representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResponse {
    pub id: String,
    pub client_id: String,
    pub profile_id: String,
    pub target_profile_id: String,
    pub kind: AssessmentKind,
    pub relation: RaterRelation,
    pub status: AssignmentStatus,
    pub expires_at: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
}

impl From<&Assignment> for AssignmentResponse {
    fn from(assignment: &Assignment) -> Self {
        Self {
            id: assignment.id.to_string(),
            client_id: assignment.client_id.to_string(),
            profile_id: assignment.profile_id.to_string(),
            target_profile_id: assignment.target_profile_id.to_string(),
            kind: assignment.kind,
            relation: assignment.relation,
            status: assignment.status,
            expires_at: assignment.expires_at.map(|t| t.to_string()),
            completed_at: assignment.completed_at.map(|t| t.to_string()),
            created_at: assignment.created_at.to_string(),
        }
    }
}

/// Result body of a submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswersResponse {
    pub recorded: usize,
    pub completed: bool,
}
