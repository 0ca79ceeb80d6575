//! Typed report data produced by the score aggregator.
//!
//! `ReportData` is the single input both PDF paths consume: the HTML report
//! view renders it client-side, and the declarative renderer maps it
//! straight to a document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DimensionId, ProfileId, Timestamp};

/// The rater's relation to the target in a 360 assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaterRelation {
    SelfRating,
    Peer,
    Manager,
    DirectReport,
}

impl RaterRelation {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            RaterRelation::SelfRating => "self",
            RaterRelation::Peer => "peer",
            RaterRelation::Manager => "manager",
            RaterRelation::DirectReport => "direct_report",
        }
    }

    /// Display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            RaterRelation::SelfRating => "Self",
            RaterRelation::Peer => "Peers",
            RaterRelation::Manager => "Manager",
            RaterRelation::DirectReport => "Direct reports",
        }
    }

    /// All relations in report display order.
    pub fn all() -> [RaterRelation; 4] {
        [
            RaterRelation::SelfRating,
            RaterRelation::Peer,
            RaterRelation::Manager,
            RaterRelation::DirectReport,
        ]
    }
}

impl fmt::Display for RaterRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RaterRelation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "self" => Ok(RaterRelation::SelfRating),
            "peer" => Ok(RaterRelation::Peer),
            "manager" => Ok(RaterRelation::Manager),
            "direct_report" => Ok(RaterRelation::DirectReport),
            other => Err(format!("Unknown rater relation: {}", other)),
        }
    }
}

/// One dimension's aggregated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// The dimension scored.
    pub dimension_id: DimensionId,

    /// Display name of the dimension.
    pub dimension_name: String,

    /// Arithmetic mean of all ratings for this dimension.
    pub score: f64,

    /// Industry benchmark for the target's industry; None when the
    /// benchmark table has no entry.
    pub benchmark: Option<f64>,

    /// Group-local norm from same-group peers; None without peers.
    pub geonorm: Option<f64>,

    /// True when the score falls under the improvement threshold
    /// relative to its comparator.
    pub needs_improvement: bool,
}

/// Per-relation response summary for the rater breakdown section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaterBreakdown {
    /// The relation this row summarizes.
    pub relation: RaterRelation,

    /// Number of answers contributed by raters with this relation.
    pub responses: usize,

    /// Mean across those answers.
    pub mean: f64,
}

/// The full aggregated report for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    /// The person being rated.
    pub target_id: ProfileId,

    /// Display name of the target.
    pub target_name: String,

    /// Industry the report was benchmarked against.
    pub industry: String,

    /// Mean across dimension means; None when no dimension has answers.
    pub overall_score: Option<f64>,

    /// Per-dimension results, sorted by dimension name.
    pub dimensions: Vec<DimensionScore>,

    /// Rater-relation breakdown, display order, empty relations omitted.
    pub raters: Vec<RaterBreakdown>,

    /// Free-text feedback with HTML stripped.
    pub feedback: Vec<String>,

    /// When the report was generated.
    pub generated_at: Timestamp,
}

impl ReportData {
    /// Dimensions currently flagged for improvement.
    pub fn flagged_dimensions(&self) -> impl Iterator<Item = &DimensionScore> {
        self.dimensions.iter().filter(|d| d.needs_improvement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_roundtrips_through_strings() {
        for relation in RaterRelation::all() {
            assert_eq!(relation.as_str().parse::<RaterRelation>().unwrap(), relation);
        }
    }

    #[test]
    fn relation_parse_rejects_unknown() {
        assert!("sibling".parse::<RaterRelation>().is_err());
    }

    #[test]
    fn relation_serializes_snake_case() {
        let json = serde_json::to_string(&RaterRelation::DirectReport).unwrap();
        assert_eq!(json, "\"direct_report\"");
    }

    #[test]
    fn flagged_dimensions_filters_by_flag() {
        let report = ReportData {
            target_id: ProfileId::new(),
            target_name: "A".into(),
            industry: "technology".into(),
            overall_score: Some(3.0),
            dimensions: vec![
                DimensionScore {
                    dimension_id: DimensionId::new(),
                    dimension_name: "communication".into(),
                    score: 2.0,
                    benchmark: Some(4.0),
                    geonorm: None,
                    needs_improvement: true,
                },
                DimensionScore {
                    dimension_id: DimensionId::new(),
                    dimension_name: "delivery".into(),
                    score: 4.0,
                    benchmark: Some(4.0),
                    geonorm: None,
                    needs_improvement: false,
                },
            ],
            raters: vec![],
            feedback: vec![],
            generated_at: Timestamp::now(),
        };
        let flagged: Vec<_> = report.flagged_dimensions().collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].dimension_name, "communication");
    }
}
