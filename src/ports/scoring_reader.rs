//! Scoring read-model port.
//!
//! The aggregator is a pure function; this port assembles its input in a
//! single adapter round-trip: the target's answers joined with dimensions
//! and rater relations, the industry benchmark table, same-group peer
//! scores for the geonorm, and free-text feedback.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProfileId};
use crate::domain::scoring::ReportInput;

/// Read model assembling everything [`crate::domain::scoring::aggregate`]
/// needs for one target.
#[async_trait]
pub trait ScoringReader: Send + Sync {
    /// Returns `None` when the target profile does not exist.
    async fn report_input(
        &self,
        target_id: &ProfileId,
    ) -> Result<Option<ReportInput>, DomainError>;
}
