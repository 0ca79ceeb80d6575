//! Integration tests for the report pipeline.
//!
//! Drives the scoring aggregator and the declarative PDF renderer through
//! the public API, end to end: raw answers -> aggregated report data ->
//! PDF bytes, plus the export use case's engine selection.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use talentscope::application::handlers::reporting::{ExportReportCommand, ExportReportHandler};
use talentscope::adapters::export::PrintpdfReportRenderer;
use talentscope::config::ExportConfig;
use talentscope::domain::directory::Profile;
use talentscope::domain::foundation::{
    AccessLevel, AuthenticatedUser, ClientId, DimensionId, DomainError, ProfileId,
};
use talentscope::domain::scoring::{aggregate, RaterRelation, ReportInput, ScoredAnswer};
use talentscope::ports::{
    ExportError, ExportRequest, PdfEngine, ProfileRepository, ReportExporter, ReportRenderer,
    ScoringReader,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct OneProfile {
    profile: Profile,
}

#[async_trait]
impl ProfileRepository for OneProfile {
    async fn save(&self, _profile: &Profile) -> Result<(), DomainError> {
        Ok(())
    }

    async fn save_all(&self, _profiles: &[Profile]) -> Result<(), DomainError> {
        Ok(())
    }

    async fn update(&self, _profile: &Profile) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        Ok((self.profile.id == *id).then(|| self.profile.clone()))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<Profile>, DomainError> {
        Ok(None)
    }

    async fn list_by_client(&self, _client_id: &ClientId) -> Result<Vec<Profile>, DomainError> {
        Ok(vec![])
    }

    async fn delete(&self, _id: &ProfileId) -> Result<(), DomainError> {
        Ok(())
    }
}

struct FixedScoring {
    input: ReportInput,
}

#[async_trait]
impl ScoringReader for FixedScoring {
    async fn report_input(
        &self,
        _target_id: &ProfileId,
    ) -> Result<Option<ReportInput>, DomainError> {
        Ok(Some(self.input.clone()))
    }
}

struct UnusedExporter;

#[async_trait]
impl ReportExporter for UnusedExporter {
    async fn export_pdf(&self, _request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        panic!("the renderer engine must not touch the browser exporter");
    }
}

fn fixture() -> (Profile, ReportInput) {
    let target = Profile::new(
        ClientId::new(),
        "Jordan Reyes",
        "jordan@example.com",
        "jreyes",
        None,
    )
    .unwrap();

    let communication = DimensionId::new();
    let delivery = DimensionId::new();

    let mut benchmarks = HashMap::new();
    benchmarks.insert(communication, 4.0);

    let mut peer_scores = HashMap::new();
    peer_scores.insert(delivery, vec![4.0, 5.0]);

    let input = ReportInput {
        target_id: target.id,
        target_name: target.name.clone(),
        industry: "technology".into(),
        answers: vec![
            ScoredAnswer {
                dimension_id: communication,
                dimension_name: "communication".into(),
                rating: 3,
                relation: RaterRelation::SelfRating,
            },
            ScoredAnswer {
                dimension_id: communication,
                dimension_name: "communication".into(),
                rating: 3,
                relation: RaterRelation::Peer,
            },
            ScoredAnswer {
                dimension_id: delivery,
                dimension_name: "delivery".into(),
                rating: 5,
                relation: RaterRelation::Peer,
            },
        ],
        benchmarks,
        peer_scores,
        feedback: vec!["<p>Writes <b>clear</b> updates &amp; specs</p>".into()],
    };
    (target, input)
}

// =============================================================================
// Aggregation to PDF
// =============================================================================

#[tokio::test]
async fn aggregated_data_renders_to_a_pdf() {
    let (_, input) = fixture();
    let report = aggregate(input);

    // Aggregation facts the renderer depends on.
    assert_eq!(report.dimensions.len(), 2);
    assert_eq!(report.dimensions[0].dimension_name, "communication");
    assert_eq!(report.dimensions[0].score, 3.0);
    assert_eq!(report.dimensions[0].benchmark, Some(4.0));
    assert!(report.dimensions[0].needs_improvement);
    assert_eq!(report.dimensions[1].geonorm, Some(4.5));
    assert_eq!(report.overall_score, Some(4.0));
    assert_eq!(report.feedback, vec!["Writes clear updates & specs"]);

    let pdf = PrintpdfReportRenderer::new()
        .render_pdf(&report)
        .await
        .unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn export_use_case_serves_the_renderer_engine_without_a_browser() {
    let (target, input) = fixture();
    let actor = AuthenticatedUser::new(
        target.id,
        "jordan@example.com",
        None,
        Some(target.client_id),
        AccessLevel::Member,
    );

    let handler = ExportReportHandler::new(
        Arc::new(OneProfile {
            profile: target.clone(),
        }),
        Arc::new(FixedScoring { input }),
        Arc::new(UnusedExporter),
        Arc::new(PrintpdfReportRenderer::new()),
        ExportConfig {
            report_base_url: "https://app.example.com/reports".into(),
            ..Default::default()
        },
    );

    let exported = handler
        .handle(ExportReportCommand {
            actor,
            target_id: target.id,
            engine: PdfEngine::Renderer,
            cookies: vec![],
        })
        .await
        .unwrap();

    assert_eq!(exported.content_type, "application/pdf");
    assert!(exported.filename.starts_with("talent-report-"));
    assert!(exported.content.starts_with(b"%PDF"));
}
