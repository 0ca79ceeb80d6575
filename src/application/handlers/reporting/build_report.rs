//! BuildReportHandler - aggregate one target's answers into report data.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, ProfileId};
use crate::domain::scoring::{aggregate, ReportData};
use crate::ports::{ProfileRepository, ScoringReader};

/// Query for one target's aggregated report.
#[derive(Debug, Clone)]
pub struct BuildReportQuery {
    pub actor: AuthenticatedUser,
    pub target_id: ProfileId,
}

/// Handler assembling and aggregating a report.
///
/// Members may only read their own report; admins read any report in
/// their client, super admins anywhere.
pub struct BuildReportHandler {
    profiles: Arc<dyn ProfileRepository>,
    scoring: Arc<dyn ScoringReader>,
}

impl BuildReportHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, scoring: Arc<dyn ScoringReader>) -> Self {
        Self { profiles, scoring }
    }

    pub async fn handle(&self, query: BuildReportQuery) -> Result<ReportData, DomainError> {
        let target = self
            .profiles
            .find_by_id(&query.target_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProfileNotFound, "Target profile not found")
            })?;

        if !query.actor.can_act_for(&target.id, &target.client_id) {
            return Err(DomainError::forbidden("Not allowed to view this report"));
        }

        let input = self
            .scoring
            .report_input(&query.target_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ReportNotFound, "No report data for target")
            })?;

        Ok(aggregate(input))
    }
}
