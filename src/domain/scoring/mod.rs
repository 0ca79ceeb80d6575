//! Scoring domain - aggregation of answers into benchmarked reports.

mod aggregator;
mod report;

pub use aggregator::{
    aggregate, mean, needs_improvement, strip_html, ReportInput, ScoredAnswer,
    IMPROVEMENT_THRESHOLD,
};
pub use report::{DimensionScore, RaterBreakdown, RaterRelation, ReportData};
