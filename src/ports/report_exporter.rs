//! Report PDF export ports.
//!
//! Two independent paths produce PDF bytes:
//!
//! - [`ReportExporter`] drives a headless browser over the already
//!   rendered HTML report view, yielding a pixel-accurate document.
//! - [`ReportRenderer`] maps typed report data straight to a simplified
//!   PDF with no browser involved.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::scoring::ReportData;

/// Which export path serves a PDF request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfEngine {
    /// Headless-browser capture of the HTML report view.
    Browser,
    /// Declarative data-to-document rendering.
    Renderer,
}

impl Default for PdfEngine {
    fn default() -> Self {
        PdfEngine::Browser
    }
}

impl std::str::FromStr for PdfEngine {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "browser" => Ok(PdfEngine::Browser),
            "renderer" => Ok(PdfEngine::Renderer),
            other => Err(ExportError::UnsupportedEngine(other.to_string())),
        }
    }
}

impl std::fmt::Display for PdfEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdfEngine::Browser => write!(f, "browser"),
            PdfEngine::Renderer => write!(f, "renderer"),
        }
    }
}

/// A session cookie replayed into the browser context so the report view
/// renders with the caller's authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default = "default_cookie_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

/// One browser-export request: the report URL plus the cookies that
/// authenticate the browsing context.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub report_url: String,
    pub cookies: Vec<SessionCookie>,
}

/// A finished PDF with download metadata.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    /// The PDF bytes.
    pub content: Vec<u8>,
    /// Always "application/pdf"; kept explicit for the HTTP layer.
    pub content_type: &'static str,
    /// Suggested download filename.
    pub filename: String,
}

impl ExportedReport {
    pub fn new(content: Vec<u8>, base_filename: &str) -> Self {
        Self {
            content,
            content_type: "application/pdf",
            filename: format!("{}.pdf", base_filename),
        }
    }
}

/// Port for the headless-browser export path.
#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// Produce a PDF of the rendered report view at `request.report_url`.
    async fn export_pdf(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError>;
}

/// Port for the declarative data-to-document path.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Build a simplified PDF straight from report data.
    async fn render_pdf(&self, report: &ReportData) -> Result<Vec<u8>, ExportError>;
}

/// Errors that can occur during report export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Unknown engine name in the request.
    #[error("Unsupported export engine: {0}")]
    UnsupportedEngine(String),

    /// The browser could not be launched.
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Navigation to the report URL failed outright.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// The report view never produced a page-boundary element: the
    /// report failed to render and there is nothing to print.
    #[error("Report did not render any pages")]
    ReportNotRendered,

    /// The browser's PDF generation call failed.
    #[error("PDF generation failed: {0}")]
    PdfGeneration(String),

    /// Declarative rendering failed inside the PDF library.
    #[error("PDF rendering failed: {0}")]
    Rendering(String),

    /// A wait step exceeded its budget where continuing is not possible.
    #[error("Export step timed out after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_engine_parses_known_names() {
        assert_eq!("browser".parse::<PdfEngine>().unwrap(), PdfEngine::Browser);
        assert_eq!("RENDERER".parse::<PdfEngine>().unwrap(), PdfEngine::Renderer);
    }

    #[test]
    fn pdf_engine_rejects_unknown_names() {
        assert!(matches!(
            "wkhtmltopdf".parse::<PdfEngine>(),
            Err(ExportError::UnsupportedEngine(_))
        ));
    }

    #[test]
    fn pdf_engine_defaults_to_browser() {
        assert_eq!(PdfEngine::default(), PdfEngine::Browser);
    }

    #[test]
    fn exported_report_names_the_file() {
        let report = ExportedReport::new(vec![0x25, 0x50, 0x44, 0x46], "report-jordan");
        assert_eq!(report.filename, "report-jordan.pdf");
        assert_eq!(report.content_type, "application/pdf");
    }

    #[test]
    fn session_cookie_defaults_path_on_deserialize() {
        let cookie: SessionCookie =
            serde_json::from_str(r#"{"name":"ts-session","value":"v","domain":"app.example.com"}"#)
                .unwrap();
        assert_eq!(cookie.path, "/");
        assert!(!cookie.secure);
    }

    #[test]
    fn exporter_ports_are_object_safe() {
        fn check_exporter<T: ReportExporter + ?Sized>() {}
        fn check_renderer<T: ReportRenderer + ?Sized>() {}
        check_exporter::<dyn ReportExporter>();
        check_renderer::<dyn ReportRenderer>();
    }
}
