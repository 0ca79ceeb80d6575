//! HTTP DTOs for report endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::scoring::{DimensionScore, RaterBreakdown, ReportData};

/// Query parameters for the PDF export endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    /// "browser" (default) or "renderer".
    pub engine: Option<String>,
}

/// Aggregated report returned as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub target_id: String,
    pub target_name: String,
    pub industry: String,
    pub overall_score: Option<f64>,
    pub dimensions: Vec<DimensionScore>,
    pub raters: Vec<RaterBreakdown>,
    pub feedback: Vec<String>,
    pub generated_at: String,
}

impl From<ReportData> for ReportResponse {
    fn from(report: ReportData) -> Self {
        Self {
            target_id: report.target_id.to_string(),
            target_name: report.target_name,
            industry: report.industry,
            overall_score: report.overall_score,
            dimensions: report.dimensions,
            raters: report.raters,
            feedback: report.feedback,
            generated_at: report.generated_at.to_string(),
        }
    }
}
