//! Score aggregation for one assessment target.
//!
//! Takes every answer recorded against a target, groups by dimension, and
//! computes per-dimension and overall means, compared against the industry
//! benchmark and the group-local norm (geonorm). Missing reference data
//! always degrades to `None` fields, never to an error.

use std::collections::HashMap;

use crate::domain::foundation::{DimensionId, ProfileId, Timestamp};

use super::{DimensionScore, RaterBreakdown, RaterRelation, ReportData};

/// A score is flagged for improvement when it falls more than this far
/// below its comparator (benchmark preferred, geonorm otherwise).
pub const IMPROVEMENT_THRESHOLD: f64 = 0.5;

/// One answer joined with its dimension and rater relation, as read
/// from storage by the `ScoringReader` port.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnswer {
    pub dimension_id: DimensionId,
    pub dimension_name: String,
    pub rating: u8,
    pub relation: RaterRelation,
}

/// Everything the aggregator needs for one target's report.
#[derive(Debug, Clone)]
pub struct ReportInput {
    /// The person being rated.
    pub target_id: ProfileId,

    /// Display name of the target.
    pub target_name: String,

    /// Industry the benchmarks were resolved for.
    pub industry: String,

    /// All answers across the target's completed assignments.
    pub answers: Vec<ScoredAnswer>,

    /// Industry benchmark per dimension, pre-filtered by industry.
    pub benchmarks: HashMap<DimensionId, f64>,

    /// Per-dimension scores of same-group peers (one entry per peer).
    pub peer_scores: HashMap<DimensionId, Vec<f64>>,

    /// Raw feedback bodies, possibly containing HTML.
    pub feedback: Vec<String>,
}

/// Aggregate one target's answers into report data.
///
/// Dimensions with no answers are omitted. The overall score is the mean
/// of dimension means, `None` when nothing was answered at all.
pub fn aggregate(input: ReportInput) -> ReportData {
    let mut by_dimension: HashMap<DimensionId, (String, Vec<f64>)> = HashMap::new();
    for answer in &input.answers {
        by_dimension
            .entry(answer.dimension_id)
            .or_insert_with(|| (answer.dimension_name.clone(), Vec::new()))
            .1
            .push(f64::from(answer.rating));
    }

    let mut dimensions: Vec<DimensionScore> = by_dimension
        .into_iter()
        .filter_map(|(dimension_id, (dimension_name, ratings))| {
            let score = mean(&ratings)?;
            let benchmark = input.benchmarks.get(&dimension_id).copied();
            let geonorm = input
                .peer_scores
                .get(&dimension_id)
                .and_then(|peers| mean(peers));
            Some(DimensionScore {
                dimension_id,
                dimension_name,
                score,
                benchmark,
                geonorm,
                needs_improvement: needs_improvement(score, benchmark, geonorm),
            })
        })
        .collect();
    dimensions.sort_by(|a, b| a.dimension_name.cmp(&b.dimension_name));

    let dimension_means: Vec<f64> = dimensions.iter().map(|d| d.score).collect();
    let overall_score = mean(&dimension_means);

    ReportData {
        target_id: input.target_id,
        target_name: input.target_name,
        industry: input.industry,
        overall_score,
        raters: rater_breakdown(&input.answers),
        feedback: input
            .feedback
            .iter()
            .map(|body| strip_html(body))
            .filter(|s| !s.is_empty())
            .collect(),
        dimensions,
        generated_at: Timestamp::now(),
    }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// A dimension needs improvement when its score sits more than
/// [`IMPROVEMENT_THRESHOLD`] below the benchmark, or below the geonorm
/// when no benchmark exists. No comparator, no flag.
pub fn needs_improvement(score: f64, benchmark: Option<f64>, geonorm: Option<f64>) -> bool {
    match benchmark.or(geonorm) {
        Some(comparator) => score < comparator - IMPROVEMENT_THRESHOLD,
        None => false,
    }
}

fn rater_breakdown(answers: &[ScoredAnswer]) -> Vec<RaterBreakdown> {
    RaterRelation::all()
        .into_iter()
        .filter_map(|relation| {
            let ratings: Vec<f64> = answers
                .iter()
                .filter(|a| a.relation == relation)
                .map(|a| f64::from(a.rating))
                .collect();
            let mean = mean(&ratings)?;
            Some(RaterBreakdown {
                relation,
                responses: ratings.len(),
                mean,
            })
        })
        .collect()
}

/// Strip HTML tags from rich-text feedback, decoding the handful of
/// entities the editor emits. Unterminated tags drop their trailing text
/// rather than leaking markup into the report.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' => {
                // Skip to the closing '>'; block-level closers become spaces
                // so "<p>a</p><p>b</p>" keeps a word boundary.
                for t in chars.by_ref() {
                    if t == '>' {
                        break;
                    }
                }
                if !out.ends_with(' ') && !out.is_empty() {
                    out.push(' ');
                }
            }
            '&' => {
                let mut entity = String::new();
                while let Some(&next) = chars.peek() {
                    if next == ';' {
                        chars.next();
                        break;
                    }
                    if entity.len() > 8 || next == '&' || next == '<' {
                        break;
                    }
                    entity.push(next);
                    chars.next();
                }
                match entity.as_str() {
                    "amp" => out.push('&'),
                    "lt" => out.push('<'),
                    "gt" => out.push('>'),
                    "quot" => out.push('"'),
                    "#39" | "apos" => out.push('\''),
                    "nbsp" => out.push(' '),
                    other => {
                        out.push('&');
                        out.push_str(other);
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
