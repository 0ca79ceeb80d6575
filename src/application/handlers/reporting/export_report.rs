//! ExportReportHandler - serve a report as PDF through either engine.

use std::sync::Arc;

use crate::config::ExportConfig;
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, ProfileId,
};
use crate::ports::{
    ExportError, ExportRequest, ExportedReport, PdfEngine, ProfileRepository, ReportExporter,
    ReportRenderer, ScoringReader, SessionCookie,
};
use crate::domain::scoring::aggregate;

/// Command to export one target's report as PDF.
#[derive(Debug, Clone)]
pub struct ExportReportCommand {
    pub actor: AuthenticatedUser,
    pub target_id: ProfileId,
    pub engine: PdfEngine,
    /// Session cookies replayed into the browser for the browser engine.
    pub cookies: Vec<SessionCookie>,
}

/// Handler producing PDF bytes via the requested engine.
///
/// The browser engine navigates a fresh headless browser to the HTML
/// report view; the renderer engine aggregates the data in-process and
/// maps it straight to a document.
pub struct ExportReportHandler {
    profiles: Arc<dyn ProfileRepository>,
    scoring: Arc<dyn ScoringReader>,
    exporter: Arc<dyn ReportExporter>,
    renderer: Arc<dyn ReportRenderer>,
    export_config: ExportConfig,
}

impl ExportReportHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        scoring: Arc<dyn ScoringReader>,
        exporter: Arc<dyn ReportExporter>,
        renderer: Arc<dyn ReportRenderer>,
        export_config: ExportConfig,
    ) -> Self {
        Self {
            profiles,
            scoring,
            exporter,
            renderer,
            export_config,
        }
    }

    pub async fn handle(&self, cmd: ExportReportCommand) -> Result<ExportedReport, DomainError> {
        let target = self
            .profiles
            .find_by_id(&cmd.target_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProfileNotFound, "Target profile not found")
            })?;

        if !cmd.actor.can_act_for(&target.id, &target.client_id) {
            return Err(DomainError::forbidden("Not allowed to export this report"));
        }

        let bytes = match cmd.engine {
            PdfEngine::Browser => {
                let request = ExportRequest {
                    report_url: self.export_config.report_url(&cmd.target_id.to_string()),
                    cookies: cmd.cookies,
                };
                tracing::info!(
                    target = %cmd.target_id,
                    url = %request.report_url,
                    "Exporting report via headless browser"
                );
                self.exporter
                    .export_pdf(&request)
                    .await
                    .map_err(map_export_error)?
            }
            PdfEngine::Renderer => {
                let input = self
                    .scoring
                    .report_input(&cmd.target_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::new(ErrorCode::ReportNotFound, "No report data for target")
                    })?;
                let report = aggregate(input);
                tracing::info!(target = %cmd.target_id, "Exporting report via renderer");
                self.renderer
                    .render_pdf(&report)
                    .await
                    .map_err(map_export_error)?
            }
        };

        Ok(ExportedReport::new(
            bytes,
            &format!("talent-report-{}", cmd.target_id),
        ))
    }
}

fn map_export_error(err: ExportError) -> DomainError {
    DomainError::new(ErrorCode::ExportFailed, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::Profile;
    use crate::domain::foundation::{AccessLevel, ClientId, DimensionId};
    use crate::domain::scoring::{RaterRelation, ReportData, ReportInput, ScoredAnswer};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockProfileRepository {
        profiles: Vec<Profile>,
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
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
            Ok(self.profiles.iter().find(|p| p.id == *id).cloned())
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<Profile>, DomainError> {
            Ok(None)
        }

        async fn list_by_client(
            &self,
            _client_id: &ClientId,
        ) -> Result<Vec<Profile>, DomainError> {
            Ok(vec![])
        }

        async fn delete(&self, _id: &ProfileId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct MockScoringReader {
        input: Option<ReportInput>,
    }

    #[async_trait]
    impl ScoringReader for MockScoringReader {
        async fn report_input(
            &self,
            _target_id: &ProfileId,
        ) -> Result<Option<ReportInput>, DomainError> {
            Ok(self.input.clone())
        }
    }

    struct MockExporter {
        requests: Mutex<Vec<ExportRequest>>,
        result: Result<Vec<u8>, ExportError>,
    }

    impl MockExporter {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                result: Ok(b"%PDF-browser".to_vec()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                result: Err(ExportError::ReportNotRendered),
            })
        }
    }

    #[async_trait]
    impl ReportExporter for MockExporter {
        async fn export_pdf(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
            self.requests.lock().unwrap().push(request.clone());
            self.result.clone()
        }
    }

    struct MockRenderer;

    #[async_trait]
    impl ReportRenderer for MockRenderer {
        async fn render_pdf(&self, _report: &ReportData) -> Result<Vec<u8>, ExportError> {
            Ok(b"%PDF-renderer".to_vec())
        }
    }

    fn export_config() -> ExportConfig {
        ExportConfig {
            report_base_url: "https://app.example.com/reports".to_string(),
            ..Default::default()
        }
    }

    fn setup(
        target: &Profile,
        exporter: Arc<MockExporter>,
        with_input: bool,
    ) -> ExportReportHandler {
        let input = with_input.then(|| {
            let dim = DimensionId::new();
            ReportInput {
                target_id: target.id,
                target_name: target.name.clone(),
                industry: "technology".into(),
                answers: vec![ScoredAnswer {
                    dimension_id: dim,
                    dimension_name: "communication".into(),
                    rating: 4,
                    relation: RaterRelation::Peer,
                }],
                benchmarks: HashMap::new(),
                peer_scores: HashMap::new(),
                feedback: vec![],
            }
        });
        ExportReportHandler::new(
            Arc::new(MockProfileRepository {
                profiles: vec![target.clone()],
            }),
            Arc::new(MockScoringReader { input }),
            exporter,
            Arc::new(MockRenderer),
            export_config(),
        )
    }

    fn target() -> Profile {
        Profile::new(
            ClientId::new(),
            "Jordan Reyes",
            "jordan@example.com",
            "jreyes",
            None,
        )
        .unwrap()
    }

    fn self_actor(target: &Profile) -> AuthenticatedUser {
        AuthenticatedUser::new(
            target.id,
            "jordan@example.com",
            None,
            Some(target.client_id),
            AccessLevel::Member,
        )
    }

    #[tokio::test]
    async fn browser_engine_navigates_to_the_report_url_with_cookies() {
        let target = target();
        let exporter = MockExporter::ok();
        let handler = setup(&target, exporter.clone(), true);

        let cookie = SessionCookie {
            name: "ts-session".into(),
            value: "tok".into(),
            domain: "app.example.com".into(),
            path: "/".into(),
            secure: true,
            http_only: true,
        };
        let result = handler
            .handle(ExportReportCommand {
                actor: self_actor(&target),
                target_id: target.id,
                engine: PdfEngine::Browser,
                cookies: vec![cookie],
            })
            .await
            .unwrap();

        assert_eq!(result.content, b"%PDF-browser");
        assert_eq!(result.content_type, "application/pdf");

        let requests = exporter.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].report_url,
            format!("https://app.example.com/reports/{}", target.id)
        );
        assert_eq!(requests[0].cookies.len(), 1);
    }

    #[tokio::test]
    async fn renderer_engine_aggregates_in_process() {
        let target = target();
        let exporter = MockExporter::ok();
        let handler = setup(&target, exporter.clone(), true);

        let result = handler
            .handle(ExportReportCommand {
                actor: self_actor(&target),
                target_id: target.id,
                engine: PdfEngine::Renderer,
                cookies: vec![],
            })
            .await
            .unwrap();

        assert_eq!(result.content, b"%PDF-renderer");
        // The browser was never involved.
        assert!(exporter.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_render_surfaces_as_export_failed() {
        let target = target();
        let handler = setup(&target, MockExporter::failing(), true);

        let err = handler
            .handle(ExportReportCommand {
                actor: self_actor(&target),
                target_id: target.id,
                engine: PdfEngine::Browser,
                cookies: vec![],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ExportFailed);
    }

    #[tokio::test]
    async fn stranger_cannot_export() {
        let target = target();
        let handler = setup(&target, MockExporter::ok(), true);
        let stranger = AuthenticatedUser::new(
            ProfileId::new(),
            "other@example.com",
            None,
            Some(ClientId::new()),
            AccessLevel::Member,
        );

        let err = handler
            .handle(ExportReportCommand {
                actor: stranger,
                target_id: target.id,
                engine: PdfEngine::Browser,
                cookies: vec![],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn renderer_without_data_is_report_not_found() {
        let target = target();
        let handler = setup(&target, MockExporter::ok(), false);

        let err = handler
            .handle(ExportReportCommand {
                actor: self_actor(&target),
                target_id: target.id,
                engine: PdfEngine::Renderer,
                cookies: vec![],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ReportNotFound);
    }
}
