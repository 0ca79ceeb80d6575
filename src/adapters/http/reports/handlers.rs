//! HTTP handlers for report endpoints: aggregated JSON and PDF export.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorBody};
use crate::adapters::http::middleware::{RawSessionToken, RequireAuth};
use crate::application::handlers::reporting::{
    BuildReportHandler, BuildReportQuery, ExportReportCommand, ExportReportHandler,
};
use crate::domain::foundation::ProfileId;
use crate::ports::{PdfEngine, SessionCookie};

use super::dto::{ExportQuery, ReportResponse};

/// Shared state for report endpoints.
#[derive(Clone)]
pub struct ReportsHandlers {
    pub build: Arc<BuildReportHandler>,
    pub export: Arc<ExportReportHandler>,
    /// Session cookie name replayed into the export browser.
    pub cookie_name: String,
    /// Host of the report views, the cookie's domain.
    pub report_host: String,
}

impl ReportsHandlers {
    pub fn new(
        build: Arc<BuildReportHandler>,
        export: Arc<ExportReportHandler>,
        cookie_name: String,
        report_base_url: &str,
    ) -> Self {
        Self {
            build,
            export,
            cookie_name,
            report_host: host_of(report_base_url),
        }
    }
}

/// GET /api/reports/:target_id - aggregated report JSON
pub async fn get_report(
    State(handlers): State<ReportsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(target_id): Path<String>,
) -> Response {
    let Ok(target_id) = target_id.parse::<ProfileId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid target ID")),
        )
            .into_response();
    };

    match handlers
        .build
        .handle(BuildReportQuery {
            actor: user,
            target_id,
        })
        .await
    {
        Ok(report) => (StatusCode::OK, Json(ReportResponse::from(report))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/reports/:target_id/pdf?engine=browser|renderer - PDF bytes
///
/// The browser engine replays the caller's own session token as a cookie
/// so the headless browser renders the report with the same
/// authorization as this request.
pub async fn export_report_pdf(
    State(handlers): State<ReportsHandlers>,
    RequireAuth(user): RequireAuth,
    RawSessionToken(token): RawSessionToken,
    Path(target_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let Ok(target_id) = target_id.parse::<ProfileId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::bad_request("Invalid target ID")),
        )
            .into_response();
    };

    let engine = match query.engine.as_deref() {
        None => PdfEngine::default(),
        Some(raw) => match raw.parse::<PdfEngine>() {
            Ok(engine) => engine,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorBody::bad_request(e.to_string())))
                    .into_response()
            }
        },
    };

    let cookies = token
        .map(|value| {
            vec![SessionCookie {
                name: handlers.cookie_name.clone(),
                value,
                domain: handlers.report_host.clone(),
                path: "/".to_string(),
                secure: true,
                http_only: true,
            }]
        })
        .unwrap_or_default();

    match handlers
        .export
        .handle(ExportReportCommand {
            actor: user,
            target_id,
            engine,
            cookies,
        })
        .await
    {
        Ok(exported) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, exported.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", exported.filename),
                ),
            ],
            exported.content,
        )
            .into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// Extracts the host (without scheme, path, or port) from a URL.
fn host_of(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host_port = without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme);
    host_port.split(':').next().unwrap_or(host_port).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_of_strips_scheme_and_path() {
        assert_eq!(host_of("https://app.example.com/reports"), "app.example.com");
        assert_eq!(host_of("http://app.example.com"), "app.example.com");
    }

    #[test]
    fn host_of_strips_port() {
        assert_eq!(host_of("http://localhost:3000/reports"), "localhost");
    }

    #[test]
    fn host_of_tolerates_bare_hosts() {
        assert_eq!(host_of("app.example.com"), "app.example.com");
    }
}
