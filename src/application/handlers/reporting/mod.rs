//! Reporting use cases - aggregation and PDF export.

mod build_report;
mod export_report;

pub use build_report::{BuildReportHandler, BuildReportQuery};
pub use export_report::{ExportReportCommand, ExportReportHandler};
