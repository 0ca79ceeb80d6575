//! Foundation types shared across the domain.
//!
//! Strongly-typed identifiers, timestamps, error types, and the
//! authenticated-user model used by every other domain module.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AccessLevel, AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AnswerId, AssignmentId, ClientId, DimensionId, FeedbackId, GroupId, ProfileId,
};
pub use timestamp::Timestamp;
