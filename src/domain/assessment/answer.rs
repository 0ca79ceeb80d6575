//! Answer entity and the rating value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnswerId, AssignmentId, DimensionId, Timestamp, ValidationError,
};

/// A rating on the fixed 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting values outside 1..=5.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// The raw scale value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The value as a score for averaging.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

/// Answer entity - one rating of one dimension within an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Unique identifier for this answer.
    pub id: AnswerId,

    /// The assignment this answer belongs to.
    pub assignment_id: AssignmentId,

    /// The dimension being rated.
    pub dimension_id: DimensionId,

    /// The rating on the 1..=5 scale.
    pub rating: Rating,

    /// When the answer was recorded.
    pub created_at: Timestamp,
}

impl Answer {
    /// Create a new answer.
    pub fn new(assignment_id: AssignmentId, dimension_id: DimensionId, rating: Rating) -> Self {
        Self {
            id: AnswerId::new(),
            assignment_id,
            dimension_id,
            rating,
            created_at: Timestamp::now(),
        }
    }
}
