//! HTTP routes for report endpoints.

use axum::{routing::get, Router};

use super::handlers::{export_report_pdf, get_report, ReportsHandlers};

/// Creates the reports router with all endpoints.
pub fn reports_routes(handlers: ReportsHandlers) -> Router {
    Router::new()
        .route("/:target_id", get(get_report))
        .route("/:target_id/pdf", get(export_report_pdf))
        .with_state(handlers)
}
