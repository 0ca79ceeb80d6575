//! Assignment aggregate entity.
//!
//! An assignment is one rater's instance of completing one assessment,
//! possibly rating a target person. 360 assessments fan out to several
//! raters per target with different relations; leader assessments are a
//! single self-directed instance.
//!
//! # Invariants
//!
//! - Status transitions only move forward: Pending -> InProgress -> Completed
//! - A completed assignment never reopens
//! - A `SelfRating` relation implies the rater is the target

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    AssignmentId, ClientId, DomainError, ErrorCode, ProfileId, Timestamp,
};
use crate::domain::scoring::RaterRelation;

/// The kind of assessment an assignment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    /// Multi-rater assessment of a target person.
    ThreeSixty,
    /// Self-directed leadership assessment.
    Leader,
}

impl AssessmentKind {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentKind::ThreeSixty => "three_sixty",
            AssessmentKind::Leader => "leader",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssessmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "three_sixty" | "360" => Ok(AssessmentKind::ThreeSixty),
            "leader" => Ok(AssessmentKind::Leader),
            other => Err(format!("Unknown assessment kind: {}", other)),
        }
    }
}

/// Lifecycle status of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::InProgress => "in_progress",
            AssignmentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AssignmentStatus::Pending),
            "in_progress" => Ok(AssignmentStatus::InProgress),
            "completed" => Ok(AssignmentStatus::Completed),
            other => Err(format!("Unknown assignment status: {}", other)),
        }
    }
}

/// Assignment aggregate - one rater's instance of one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier for this assignment.
    pub id: AssignmentId,

    /// Owning client organization.
    pub client_id: ClientId,

    /// The rater completing this assignment.
    pub profile_id: ProfileId,

    /// The person being rated. Equals `profile_id` for self ratings.
    pub target_profile_id: ProfileId,

    /// Kind of assessment this instance belongs to.
    pub kind: AssessmentKind,

    /// The rater's relation to the target.
    pub relation: RaterRelation,

    /// Lifecycle status.
    pub status: AssignmentStatus,

    /// Deadline after which answers are no longer accepted.
    pub expires_at: Option<Timestamp>,

    /// When the assignment was completed.
    pub completed_at: Option<Timestamp>,

    /// When the assignment was created.
    pub created_at: Timestamp,

    /// When the assignment was last updated.
    pub updated_at: Timestamp,
}

impl Assignment {
    /// Create a new pending assignment.
    pub fn new(
        client_id: ClientId,
        profile_id: ProfileId,
        target_profile_id: ProfileId,
        kind: AssessmentKind,
        relation: RaterRelation,
        expires_at: Option<Timestamp>,
    ) -> Result<Self, DomainError> {
        if relation == RaterRelation::SelfRating && profile_id != target_profile_id {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "A self rating must target the rater themselves",
            ));
        }
        if relation != RaterRelation::SelfRating && profile_id == target_profile_id {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "A rater cannot hold a peer relation to themselves",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: AssignmentId::new(),
            client_id,
            profile_id,
            target_profile_id,
            kind,
            relation,
            status: AssignmentStatus::Pending,
            expires_at,
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// True once the deadline has passed.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.map(|e| now.is_after(&e)).unwrap_or(false)
    }

    /// Mark the assignment as started.
    pub fn start(&mut self, now: Timestamp) -> Result<(), DomainError> {
        match self.status {
            AssignmentStatus::Pending => {
                self.guard_not_expired(now)?;
                self.status = AssignmentStatus::InProgress;
                self.updated_at = now;
                Ok(())
            }
            AssignmentStatus::InProgress => Ok(()),
            AssignmentStatus::Completed => Err(DomainError::new(
                ErrorCode::AssignmentCompleted,
                "Assignment is already completed",
            )),
        }
    }

    /// Mark the assignment as completed.
    pub fn complete(&mut self, now: Timestamp) -> Result<(), DomainError> {
        match self.status {
            AssignmentStatus::Completed => Err(DomainError::new(
                ErrorCode::AssignmentCompleted,
                "Assignment is already completed",
            )),
            _ => {
                self.guard_not_expired(now)?;
                self.status = AssignmentStatus::Completed;
                self.completed_at = Some(now);
                self.updated_at = now;
                Ok(())
            }
        }
    }

    fn guard_not_expired(&self, now: Timestamp) -> Result<(), DomainError> {
        if self.is_expired(now) {
            return Err(DomainError::new(
                ErrorCode::AssignmentExpired,
                "Assignment deadline has passed",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn self_assignment() -> Assignment {
        let rater = ProfileId::new();
        Assignment::new(
            ClientId::new(),
            rater,
            rater,
            AssessmentKind::Leader,
            RaterRelation::SelfRating,
            None,
        )
        .unwrap()
    }

    #[test]
    fn kind_and_status_roundtrip_through_strings() {
        for kind in [AssessmentKind::ThreeSixty, AssessmentKind::Leader] {
            assert_eq!(kind.as_str().parse::<AssessmentKind>().unwrap(), kind);
        }
        for status in [
            AssignmentStatus::Pending,
            AssignmentStatus::InProgress,
            AssignmentStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<AssignmentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn kind_parse_accepts_360_alias() {
        assert_eq!("360".parse::<AssessmentKind>().unwrap(), AssessmentKind::ThreeSixty);
    }

    #[test]
    fn self_rating_must_target_self() {
        let result = Assignment::new(
            ClientId::new(),
            ProfileId::new(),
            ProfileId::new(),
            AssessmentKind::ThreeSixty,
            RaterRelation::SelfRating,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn peer_rating_cannot_target_self() {
        let rater = ProfileId::new();
        let result = Assignment::new(
            ClientId::new(),
            rater,
            rater,
            AssessmentKind::ThreeSixty,
            RaterRelation::Peer,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn start_moves_pending_to_in_progress() {
        let mut a = self_assignment();
        a.start(Timestamp::now()).unwrap();
        assert_eq!(a.status, AssignmentStatus::InProgress);
    }

    #[test]
    fn start_is_idempotent_for_in_progress() {
        let mut a = self_assignment();
        a.start(Timestamp::now()).unwrap();
        assert!(a.start(Timestamp::now()).is_ok());
    }

    #[test]
    fn complete_sets_completed_at() {
        let mut a = self_assignment();
        let now = Timestamp::now();
        a.complete(now).unwrap();
        assert_eq!(a.status, AssignmentStatus::Completed);
        assert_eq!(a.completed_at, Some(now));
    }

    #[test]
    fn completed_assignment_never_reopens() {
        let mut a = self_assignment();
        a.complete(Timestamp::now()).unwrap();
        let err = a.start(Timestamp::now()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AssignmentCompleted);
        let err = a.complete(Timestamp::now()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AssignmentCompleted);
    }

    #[test]
    fn expired_assignment_rejects_completion() {
        let mut a = self_assignment();
        a.expires_at = Some(Timestamp::now().add_days(-1));
        let err = a.complete(Timestamp::now()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AssignmentExpired);
    }

    #[test]
    fn is_expired_without_deadline_is_false() {
        let a = self_assignment();
        assert!(!a.is_expired(Timestamp::now().add_days(365)));
    }
}
