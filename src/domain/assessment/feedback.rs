//! Feedback entity - free-text commentary attached to an assignment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssignmentId, FeedbackId, Timestamp, ValidationError};

/// Free-text feedback left by a rater. The body may contain HTML from the
/// rich-text editor; reports strip it before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Unique identifier for this feedback entry.
    pub id: FeedbackId,

    /// The assignment this feedback belongs to.
    pub assignment_id: AssignmentId,

    /// Raw feedback body as submitted.
    pub body: String,

    /// When the feedback was recorded.
    pub created_at: Timestamp,
}

impl Feedback {
    /// Create a new feedback entry.
    pub fn new(
        assignment_id: AssignmentId,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ValidationError::empty_field("body"));
        }
        Ok(Self {
            id: FeedbackId::new(),
            assignment_id,
            body,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_keeps_raw_body() {
        let f = Feedback::new(AssignmentId::new(), "<p>Great work</p>").unwrap();
        assert_eq!(f.body, "<p>Great work</p>");
    }

    #[test]
    fn feedback_rejects_blank_body() {
        assert!(Feedback::new(AssignmentId::new(), "   ").is_err());
    }
}
